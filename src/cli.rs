use clap::Parser;

#[derive(Parser, Default)]
#[command(name = "deskwatch", about = "A terminal IT help-desk console")]
#[command(version, long_about = None)]
pub struct Args {
    /// Base URL of the help-desk backend API
    #[arg(short = 's', long = "server", default_value = "http://127.0.0.1:5000")]
    pub server: String,

    /// Section to open at startup (e.g. dashboard, tickets, security)
    #[arg(long = "section")]
    pub section: Option<String>,

    /// Auto-refresh interval in seconds
    #[arg(short = 't', long = "interval", default_value = "30")]
    pub refresh_interval: u64,

    /// List available sections and exit
    #[arg(short, long)]
    pub list_sections: bool,

    /// Probe the backend once and exit (0 = reachable)
    #[arg(long)]
    pub check: bool,

    /// Print a one-shot text dashboard and exit (bypass TUI)
    #[arg(long)]
    pub snapshot: bool,

    /// Log session warnings and actions to file ("-" for stdout)
    #[arg(short = 'f', long = "file")]
    pub log_file: Option<String>,
}

impl Args {
    /// Validates arguments before any network or terminal work happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskwatch::cli::Args;
    ///
    /// let args = Args {
    ///     server: "http://127.0.0.1:5000".to_string(),
    ///     refresh_interval: 30,
    ///     ..Default::default()
    /// };
    /// assert!(args.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err(format!(
                "Server URL must start with http:// or https:// (got '{}')",
                self.server
            ));
        }

        if self.refresh_interval < 5 {
            return Err("Refresh interval too small (minimum 5 seconds)".to_string());
        }

        if self.refresh_interval > 3600 {
            return Err("Refresh interval too large (maximum 3600 seconds)".to_string());
        }

        if let Some(section) = &self.section {
            crate::validation::validate_section_id(section).map_err(|e| e.to_string())?;
        }

        if let Some(path) = &self.log_file {
            if path != "-" {
                crate::validation::validate_file_path(path).map_err(|e| e.to_string())?;
            }
        }

        Ok(())
    }
}
