use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Append-only session log: fetch failures, envelope violations, unknown
/// section ids and mutating actions. `-` logs to stdout instead of a file.
pub struct SessionLogger {
    file: Option<std::fs::File>,
    use_stdout: bool,
}

impl SessionLogger {
    pub fn new(path: Option<String>) -> anyhow::Result<Self> {
        let (file, use_stdout) = if let Some(path) = path {
            if path == "-" {
                (None, true)
            } else {
                crate::validation::validate_file_path(&path)?;
                let f = OpenOptions::new().create(true).append(true).open(path)?;
                (Some(f), false)
            }
        } else {
            (None, false)
        };

        Ok(Self { file, use_stdout })
    }

    /// A logger that discards everything; used when no `-f` was given.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            file: None,
            use_stdout: false,
        }
    }

    pub fn warn(&mut self, message: &str) {
        self.write_line("WARN", message);
    }

    pub fn action(&mut self, message: &str) {
        self.write_line("ACTION", message);
    }

    fn write_line(&mut self, level: &str, message: &str) {
        let now = Local::now();
        let line = format!("{} {level} {message}\n", now.format("%Y-%m-%d %H:%M:%S"));

        match (&mut self.file, self.use_stdout) {
            (Some(f), _) => {
                let _ = f.write_all(line.as_bytes());
                let _ = f.flush();
            }
            (None, true) => print!("{line}"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        let mut logger = SessionLogger::new(Some(path.to_string_lossy().into_owned())).unwrap();

        logger.warn("unknown section id 'foo'");
        logger.action("ticket #3 status changed to resolved");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WARN unknown section id 'foo'"));
        assert!(content.contains("ACTION ticket #3 status changed to resolved"));
    }

    #[test]
    fn disabled_logger_is_silent() {
        let mut logger = SessionLogger::disabled();
        logger.warn("dropped");
    }
}
