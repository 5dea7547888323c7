use clap::Parser;
use deskwatch::{cli::Args, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    run(args)
}
