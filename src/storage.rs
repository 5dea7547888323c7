//! Local preference store.
//!
//! The console keeps a small JSON state file per user: three UI toggles,
//! saved onboarding progress and a capped audit log. Absent keys resolve
//! to fixed defaults (dark mode on, auto-refresh off, sidebar expanded);
//! a missing or corrupt file falls back to all defaults rather than
//! failing startup.

use crate::error::{ConsoleError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Most recent audit entries kept, newest first.
pub const AUDIT_LOG_CAP: usize = 100;

fn default_dark_mode() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub action: String,
    pub target: String,
    pub status: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingProgress {
    pub employee: String,
    pub tasks: Vec<crate::model::OnboardingTask>,
    pub saved_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default)]
    pub auto_refresh: bool,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default)]
    pub onboarding_progress: Option<OnboardingProgress>,
    #[serde(default)]
    pub audit_logs: Vec<AuditEntry>,
}

impl Default for StoredState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            auto_refresh: false,
            sidebar_collapsed: false,
            onboarding_progress: None,
            audit_logs: Vec::new(),
        }
    }
}

pub struct LocalStore {
    path: PathBuf,
    pub state: StoredState,
}

impl LocalStore {
    /// Opens the store at the default per-user location.
    pub fn open() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ConsoleError::Storage("No data directory available".to_string()))?
            .join("deskwatch");
        Self::open_at(dir.join("state.json"))
    }

    /// Opens the store at an explicit path. Corrupt content is discarded.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => StoredState::default(),
        };
        Ok(Self { path, state })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.state.dark_mode = enabled;
        self.save()
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) -> Result<()> {
        self.state.auto_refresh = enabled;
        self.save()
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<()> {
        self.state.sidebar_collapsed = collapsed;
        self.save()
    }

    /// Prepends an audit entry, truncating to the [`AUDIT_LOG_CAP`] newest.
    pub fn add_audit_entry(&mut self, action: &str, target: &str, status: &str) -> Result<()> {
        self.state.audit_logs.insert(
            0,
            AuditEntry {
                timestamp: Utc::now().to_rfc3339(),
                action: action.to_string(),
                target: target.to_string(),
                status: status.to_string(),
                user: whoami(),
            },
        );
        self.state.audit_logs.truncate(AUDIT_LOG_CAP);
        self.save()
    }

    pub fn save_onboarding(
        &mut self,
        employee: &str,
        tasks: &[crate::model::OnboardingTask],
    ) -> Result<()> {
        self.state.onboarding_progress = Some(OnboardingProgress {
            employee: employee.to_string(),
            tasks: tasks.to_vec(),
            saved_at: Utc::now().to_rfc3339(),
        });
        self.save()
    }
}

fn whoami() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "IT Admin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OnboardingTask;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open_at(dir.path().join("state.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn defaults_when_file_absent() {
        let (_dir, store) = temp_store();
        assert!(store.state.dark_mode);
        assert!(!store.state.auto_refresh);
        assert!(!store.state.sidebar_collapsed);
        assert!(store.state.audit_logs.is_empty());
    }

    #[test]
    fn preferences_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open_at(path.clone()).unwrap();
        store.set_dark_mode(false).unwrap();
        store.set_auto_refresh(true).unwrap();
        store.set_sidebar_collapsed(true).unwrap();

        let reloaded = LocalStore::open_at(path).unwrap();
        assert!(!reloaded.state.dark_mode);
        assert!(reloaded.state.auto_refresh);
        assert!(reloaded.state.sidebar_collapsed);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalStore::open_at(path).unwrap();
        assert!(store.state.dark_mode);
        assert!(!store.state.auto_refresh);
    }

    #[test]
    fn audit_log_capped_newest_first() {
        let (_dir, mut store) = temp_store();
        for i in 0..110 {
            store
                .add_audit_entry("Password Reset", &format!("user{i}"), "success")
                .unwrap();
        }
        assert_eq!(store.state.audit_logs.len(), AUDIT_LOG_CAP);
        // Newest entry first
        assert_eq!(store.state.audit_logs[0].target, "user109");
        assert_eq!(store.state.audit_logs[99].target, "user10");
    }

    #[test]
    fn onboarding_progress_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open_at(path.clone()).unwrap();
        let tasks = vec![OnboardingTask {
            id: 1,
            task: "Create AD account".to_string(),
            category: "Account Setup".to_string(),
            completed: true,
        }];
        store.save_onboarding("Ada Lovelace", &tasks).unwrap();

        let reloaded = LocalStore::open_at(path).unwrap();
        let progress = reloaded.state.onboarding_progress.unwrap();
        assert_eq!(progress.employee, "Ada Lovelace");
        assert_eq!(progress.tasks.len(), 1);
        assert!(progress.tasks[0].completed);
    }
}
