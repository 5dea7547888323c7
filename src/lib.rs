//! # deskwatch
//!
//! A terminal IT help-desk console, the TUI counterpart to an Endpoint
//! Assist style web dashboard. It polls a REST-ish JSON backend and
//! renders system health, security posture, network diagnostics, device
//! inventory, support tickets and administrative tooling one section at
//! a time.
//!
//! ## Features
//!
//! - Section-per-view dashboard with a nav sidebar and 30s auto-refresh
//! - Background fetch worker with stale-response sequencing
//! - Ticket triage: create, inspect and cycle status from the keyboard
//! - AD user lookup with password reset and account unlock
//! - Local preference store and capped audit log
//!
//! ## Example
//!
//! ```rust,no_run
//! use deskwatch::cli::Args;
//! use deskwatch::run;
//!
//! let args = Args {
//!     server: "http://127.0.0.1:5000".to_string(),
//!     refresh_interval: 30,
//!     list_sections: true,
//!     ..Default::default()
//! };
//!
//! run(args).expect("Failed to run deskwatch");
//! ```

pub mod actions;
pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod input;
pub mod logger;
pub mod model;
pub mod notify;
pub mod overview;
pub mod router;
pub mod sched;
pub mod storage;
pub mod store;
pub mod validation;

use anyhow::Result;
use cli::Args;
use client::ApiClient;
use crossterm::{execute, terminal::*};
use logger::SessionLogger;
use router::Section;

/// Main entry point for the deskwatch application.
///
/// Dispatches between the simple text modes (`--list-sections`,
/// `--check`, `--snapshot`) and the interactive dashboard.
pub fn run(args: Args) -> Result<()> {
    args.validate().map_err(|e| anyhow::anyhow!(e))?;

    if args.list_sections {
        return list_sections();
    }

    let mut config = config::Config::load()?;
    config.apply_args(&args);

    let client = ApiClient::new(&config.server)?;

    if args.check {
        return overview::run_check(&client);
    }

    if args.snapshot {
        return overview::print_snapshot(&client);
    }

    let store = storage::LocalStore::open()?;
    let mut log = if args.log_file.is_some() {
        SessionLogger::new(args.log_file.clone())?
    } else {
        SessionLogger::disabled()
    };

    // Unknown ids fall back to the dashboard, loudly
    let initial_section = match &args.section {
        Some(id) => {
            let (section, known) = router::resolve_section(id);
            if !known {
                log.warn(&format!("unknown section id '{id}', using dashboard"));
                eprintln!("Unknown section '{id}', starting on the dashboard");
            }
            section
        }
        None => Section::Dashboard,
    };

    match initialize_tui() {
        Ok(mut stdout) => {
            let result = dashboard::run_dashboard(client, config, store, log, initial_section);

            let _ = disable_raw_mode();
            let _ = execute!(stdout, LeaveAlternateScreen);
            result
        }
        Err(e) => {
            eprintln!("TUI initialization failed: {e}");
            eprintln!("Falling back to snapshot mode...");
            overview::print_snapshot(&client)
        }
    }
}

fn list_sections() -> Result<()> {
    for section in Section::all() {
        println!("{:<14} {}", section.id(), section.title());
    }
    Ok(())
}

fn initialize_tui() -> Result<std::io::Stdout> {
    use std::io;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    Ok(stdout)
}
