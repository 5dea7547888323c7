//! Section routing: one top-level view is active at a time.
//!
//! `Section` maps a stable string id to a page title and a loader set.
//! Unknown ids are not an error upstream; here they fall back to the
//! dashboard with a logged warning so integration bugs surface in tests.

use crate::fetch::Resource;
use crate::store::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    System,
    Security,
    Network,
    Performance,
    Peripherals,
    Inventory,
    Tickets,
    Knowledge,
    AdUsers,
    Onboarding,
    Services,
    Compliance,
    RemoteTools,
    Logs,
    Reports,
    Experimental,
}

impl Section {
    pub fn all() -> Vec<Self> {
        vec![
            Self::Dashboard,
            Self::System,
            Self::Security,
            Self::Network,
            Self::Performance,
            Self::Peripherals,
            Self::Inventory,
            Self::Tickets,
            Self::Knowledge,
            Self::AdUsers,
            Self::Onboarding,
            Self::Services,
            Self::Compliance,
            Self::RemoteTools,
            Self::Logs,
            Self::Reports,
            Self::Experimental,
        ]
    }

    /// Stable id used in `--section` and the nav sidebar.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::System => "system",
            Self::Security => "security",
            Self::Network => "network",
            Self::Performance => "performance",
            Self::Peripherals => "peripherals",
            Self::Inventory => "inventory",
            Self::Tickets => "tickets",
            Self::Knowledge => "knowledge",
            Self::AdUsers => "adusers",
            Self::Onboarding => "onboarding",
            Self::Services => "services",
            Self::Compliance => "compliance",
            Self::RemoteTools => "remotetools",
            Self::Logs => "logs",
            Self::Reports => "reports",
            Self::Experimental => "experimental",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::System => "System Health",
            Self::Security => "Security Status",
            Self::Network => "Network Diagnostics",
            Self::Performance => "Performance Tools",
            Self::Peripherals => "Peripheral Devices",
            Self::Inventory => "Device Inventory",
            Self::Tickets => "Support Tickets",
            Self::Knowledge => "Knowledge Base",
            Self::AdUsers => "AD User Lookup",
            Self::Onboarding => "New Employee Setup",
            Self::Services => "Windows Services",
            Self::Compliance => "Compliance Check",
            Self::RemoteTools => "Remote Tools",
            Self::Logs => "Audit Logs",
            Self::Reports => "Reports",
            Self::Experimental => "Experimental Tools",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.id() == id)
    }

    /// Loader set enqueued when this section becomes (or stays) current.
    ///
    /// Sections driven purely by user actions (AD lookup, compliance,
    /// remote tools, reports, experimental) load nothing on entry. The
    /// onboarding checklist only fetches while the local cache is empty so
    /// unsaved toggles survive navigation.
    #[must_use]
    pub fn loaders(&self, state: &AppState) -> Vec<Resource> {
        match self {
            Self::Dashboard => vec![
                Resource::SystemHealth,
                Resource::SecurityStatus,
                Resource::NetworkInfo,
                Resource::Tickets,
            ],
            Self::System => vec![Resource::SystemHealth, Resource::Processes],
            Self::Security => vec![Resource::SecurityStatus],
            Self::Network => vec![Resource::NetworkInfo, Resource::WifiStatus],
            Self::Performance => vec![Resource::StartupPrograms],
            Self::Peripherals => vec![
                Resource::Printers,
                Resource::AudioDevices,
                Resource::Cameras,
                Resource::Bluetooth,
                Resource::UsbDevices,
            ],
            Self::Inventory => vec![Resource::Inventory],
            Self::Tickets => vec![Resource::Tickets],
            Self::Knowledge => vec![Resource::KnowledgeBase],
            Self::Onboarding => {
                if state.onboarding_tasks.is_empty() {
                    vec![Resource::OnboardingChecklist]
                } else {
                    Vec::new()
                }
            }
            Self::Services => vec![Resource::Services, Resource::CriticalServices],
            Self::AdUsers
            | Self::Compliance
            | Self::RemoteTools
            | Self::Logs
            | Self::Reports
            | Self::Experimental => Vec::new(),
        }
    }
}

/// Resolves a section id, falling back to the dashboard for unknown ids.
/// Returns the section and whether the id was recognized.
#[must_use]
pub fn resolve_section(id: &str) -> (Section, bool) {
    match Section::from_id(id) {
        Some(section) => (section, true),
        None => (Section::Dashboard, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for section in Section::all() {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
    }

    #[test]
    fn unknown_id_falls_back_to_dashboard() {
        let (section, known) = resolve_section("procurement-v2");
        assert_eq!(section, Section::Dashboard);
        assert!(!known);

        let (section, known) = resolve_section("tickets");
        assert_eq!(section, Section::Tickets);
        assert!(known);
    }

    #[test]
    fn action_sections_load_nothing() {
        let state = AppState::default();
        assert!(Section::AdUsers.loaders(&state).is_empty());
        assert!(Section::Compliance.loaders(&state).is_empty());
        assert!(Section::RemoteTools.loaders(&state).is_empty());
    }

    #[test]
    fn onboarding_loads_only_when_cache_empty() {
        let mut state = AppState::default();
        assert_eq!(
            Section::Onboarding.loaders(&state),
            vec![Resource::OnboardingChecklist]
        );

        state.onboarding_tasks.push(crate::model::OnboardingTask {
            id: 1,
            task: "Provision laptop".to_string(),
            category: "Hardware".to_string(),
            completed: false,
        });
        assert!(Section::Onboarding.loaders(&state).is_empty());
    }

    #[test]
    fn dashboard_loader_set() {
        let state = AppState::default();
        let loaders = Section::Dashboard.loaders(&state);
        assert!(loaders.contains(&Resource::SystemHealth));
        assert!(loaders.contains(&Resource::Tickets));
        assert_eq!(loaders.len(), 4);
    }
}
