//! Application state.
//!
//! Everything the original held in page globals lives here as fields of
//! one struct, passed `&mut` wherever the router, loaders or action
//! handlers need it. Each cache is independently fetched and
//! independently stale; no cross-resource consistency is enforced.

use crate::config::FailurePolicy;
use crate::fetch::{FetchDone, FetchJob, Payload, Resource, ResourceKind};
use crate::model::*;
use crate::router::Section;
use std::collections::HashMap;

/// Per-resource fetch status, rendered as a badge next to panel titles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Default)]
pub struct AppState {
    pub current_section: Section,
    pub section_index: usize,

    // UI toggles, mirrored from the local store at startup
    pub dark_mode: bool,
    pub auto_refresh: bool,
    pub sidebar_collapsed: bool,
    pub show_help: bool,
    pub selected_item: usize,

    // resource caches
    pub health: Option<SystemHealth>,
    pub processes: Vec<ProcessInfo>,
    pub startup_programs: Vec<StartupProgram>,
    pub security: Option<SecurityStatus>,
    pub network: Option<NetworkInfo>,
    pub wifi: Option<WifiStatus>,
    pub printers: Vec<PeripheralDevice>,
    pub audio_devices: Vec<PeripheralDevice>,
    pub cameras: Vec<PeripheralDevice>,
    pub bluetooth: Vec<PeripheralDevice>,
    pub usb_devices: Vec<PeripheralDevice>,
    pub inventory: Option<InventoryReport>,
    pub all_software: Vec<SoftwareEntry>,
    pub tickets: Vec<Ticket>,
    pub all_kb_articles: Vec<KbArticle>,
    pub kb_results: Vec<KbArticle>,
    pub kb_detail: Option<KbArticle>,
    pub ad_users: Vec<AdUser>,
    pub ad_query: String,
    pub selected_ad_user: Option<String>,
    pub onboarding_tasks: Vec<OnboardingTask>,
    pub onboarding_employee: String,
    pub all_services: Vec<ServiceEntry>,
    pub critical_services: Vec<ServiceEntry>,
    pub compliance: Option<ComplianceReport>,
    pub port_host_pending: Option<String>,
    pub ping_result: Option<PingResult>,
    pub dns_result: Option<DnsResult>,
    pub port_result: Option<PortCheckResult>,
    pub trace_result: Option<TracerouteResult>,
    pub ipconfig_output: Option<String>,
    pub error_logs: Vec<ErrorLogEntry>,
    pub speed_test: Option<SpeedTestResult>,
    pub network_scan: Option<NetworkScanResult>,
    pub report: Option<GeneratedReport>,

    // client-side filters
    pub software_filter: String,
    pub service_filter: String,
    pub kb_filter: String,
    pub ticket_filter: Option<TicketStatus>,

    // request sequencing: last issued sequence per resource kind
    load_states: HashMap<ResourceKind, LoadState>,
    latest_seq: HashMap<ResourceKind, u64>,
    next_seq: u64,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dark_mode: true,
            ..Self::default()
        }
    }

    // ---------- navigation ----------

    /// Makes `section` current and resets per-section selection. Exactly
    /// one section is active at a time; repeating a navigation is a no-op
    /// beyond the selection reset.
    pub fn navigate(&mut self, section: Section) {
        self.current_section = section;
        self.section_index = Section::all()
            .iter()
            .position(|s| *s == section)
            .unwrap_or(0);
        self.selected_item = 0;
        self.kb_detail = None;
    }

    pub fn next_section(&mut self) {
        let sections = Section::all();
        self.navigate(sections[(self.section_index + 1) % sections.len()]);
    }

    pub fn prev_section(&mut self) {
        let sections = Section::all();
        let index = if self.section_index == 0 {
            sections.len() - 1
        } else {
            self.section_index - 1
        };
        self.navigate(sections[index]);
    }

    pub fn next_item(&mut self, len: usize) {
        if len > 0 {
            self.selected_item = (self.selected_item + 1) % len;
        }
    }

    pub fn prev_item(&mut self, len: usize) {
        if len > 0 {
            self.selected_item = if self.selected_item == 0 {
                len - 1
            } else {
                self.selected_item - 1
            };
        }
    }

    // ---------- sequencing ----------

    /// Issues a job for `resource`, bumping its sequence so any completion
    /// from an earlier request for the same resource is dropped on apply.
    pub fn issue(&mut self, resource: Resource) -> FetchJob {
        self.next_seq += 1;
        let seq = self.next_seq;
        let kind = resource.kind();
        self.latest_seq.insert(kind, seq);
        self.load_states.insert(kind, LoadState::Loading);
        FetchJob { resource, seq }
    }

    #[must_use]
    pub fn load_state(&self, kind: ResourceKind) -> &LoadState {
        self.load_states.get(&kind).unwrap_or(&LoadState::Idle)
    }

    /// Applies a completed fetch. Stale completions (an older sequence
    /// than the latest issued for the resource) are dropped silently;
    /// the last initiated request wins. Returns the error message when the
    /// fetch failed, for the caller to toast and log.
    pub fn apply(&mut self, done: FetchDone, policy: FailurePolicy) -> Option<String> {
        let latest = self.latest_seq.get(&done.kind).copied().unwrap_or(0);
        if done.seq < latest {
            return None;
        }

        match done.result {
            Ok(payload) => {
                self.load_states.insert(done.kind, LoadState::Loaded);
                self.store_payload(done.kind, payload);
                None
            }
            Err(err) => {
                let message = err.to_string();
                self.load_states
                    .insert(done.kind, LoadState::Failed(message.clone()));
                if policy == FailurePolicy::Clear {
                    self.clear_cache(done.kind);
                }
                Some(message)
            }
        }
    }

    /// Replaces the resource's cache wholesale. Re-applying a payload
    /// yields identical state, never appended duplicates.
    fn store_payload(&mut self, kind: ResourceKind, payload: Payload) {
        match payload {
            Payload::SystemHealth(v) => self.health = Some(v),
            Payload::Processes(v) => self.processes = v,
            Payload::StartupPrograms(v) => self.startup_programs = v,
            Payload::SecurityStatus(v) => self.security = Some(v),
            Payload::NetworkInfo(v) => self.network = Some(v),
            Payload::WifiStatus(v) => self.wifi = Some(v),
            Payload::Printers(v) => self.printers = v,
            Payload::AudioDevices(v) => self.audio_devices = v,
            Payload::Cameras(v) => self.cameras = v,
            Payload::Bluetooth(v) => self.bluetooth = v,
            Payload::UsbDevices(v) => self.usb_devices = v,
            Payload::Inventory(v) => {
                self.all_software = v.software.clone();
                self.inventory = Some(v);
            }
            Payload::Tickets(v) => self.tickets = v,
            Payload::KnowledgeBase(v) => {
                if kind == ResourceKind::KbSearch {
                    self.kb_results = v;
                } else {
                    self.kb_results = v.clone();
                    self.all_kb_articles = v;
                }
            }
            // Only refresh an open detail view; if the reader already went
            // back to the list, a late completion must not reopen it
            Payload::KbArticleDetail(v) => {
                if self.kb_detail.is_some() {
                    self.kb_detail = Some(v);
                }
            }
            Payload::AdUsers(v) => self.ad_users = v,
            Payload::OnboardingChecklist(v) => self.onboarding_tasks = v,
            Payload::Services(v) => self.all_services = v,
            Payload::CriticalServices(v) => self.critical_services = v,
            Payload::Compliance(v) => self.compliance = Some(v),
            Payload::Ping(v) => self.ping_result = Some(v),
            Payload::Dns(v) => self.dns_result = Some(v),
            Payload::PortCheck(v) => self.port_result = Some(v),
            Payload::Traceroute(v) => self.trace_result = Some(v),
            Payload::Ipconfig(v) => self.ipconfig_output = Some(v),
            Payload::ErrorLogs(v) => self.error_logs = v,
            Payload::SpeedTest(v) => self.speed_test = Some(v),
            Payload::NetworkScan(v) => self.network_scan = Some(v),
            Payload::Report(v) => self.report = Some(v),
        }
    }

    fn clear_cache(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::SystemHealth => self.health = None,
            ResourceKind::Processes => self.processes.clear(),
            ResourceKind::StartupPrograms => self.startup_programs.clear(),
            ResourceKind::SecurityStatus => self.security = None,
            ResourceKind::NetworkInfo => self.network = None,
            ResourceKind::WifiStatus => self.wifi = None,
            ResourceKind::Printers => self.printers.clear(),
            ResourceKind::AudioDevices => self.audio_devices.clear(),
            ResourceKind::Cameras => self.cameras.clear(),
            ResourceKind::Bluetooth => self.bluetooth.clear(),
            ResourceKind::UsbDevices => self.usb_devices.clear(),
            ResourceKind::Inventory => {
                self.inventory = None;
                self.all_software.clear();
            }
            ResourceKind::Tickets => self.tickets.clear(),
            ResourceKind::KnowledgeBase | ResourceKind::KbSearch => {
                self.kb_results.clear();
            }
            ResourceKind::KbArticle => self.kb_detail = None,
            ResourceKind::AdSearch => self.ad_users.clear(),
            ResourceKind::OnboardingChecklist => self.onboarding_tasks.clear(),
            ResourceKind::Services => self.all_services.clear(),
            ResourceKind::CriticalServices => self.critical_services.clear(),
            ResourceKind::Compliance => self.compliance = None,
            ResourceKind::Ping => self.ping_result = None,
            ResourceKind::Dns => self.dns_result = None,
            ResourceKind::PortCheck => self.port_result = None,
            ResourceKind::Traceroute => self.trace_result = None,
            ResourceKind::Ipconfig => self.ipconfig_output = None,
            ResourceKind::ErrorLogs => self.error_logs.clear(),
            ResourceKind::SpeedTest => self.speed_test = None,
            ResourceKind::NetworkScan => self.network_scan = None,
            ResourceKind::Report => self.report = None,
        }
    }

    // ---------- derived views ----------

    #[must_use]
    pub fn filtered_software(&self) -> Vec<&SoftwareEntry> {
        filter_software(&self.all_software, &self.software_filter)
    }

    #[must_use]
    pub fn filtered_services(&self) -> Vec<&ServiceEntry> {
        filter_services(&self.all_services, &self.service_filter)
    }

    #[must_use]
    pub fn filtered_tickets(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| self.ticket_filter.map_or(true, |f| t.status == f))
            .collect()
    }

    /// Onboarding progress as (completed, total).
    #[must_use]
    pub fn onboarding_progress(&self) -> (usize, usize) {
        let done = self
            .onboarding_tasks
            .iter()
            .filter(|t| t.completed)
            .count();
        (done, self.onboarding_tasks.len())
    }

    pub fn toggle_onboarding_task(&mut self, id: u64) {
        if let Some(task) = self.onboarding_tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
        }
    }

    pub fn reset_onboarding(&mut self) {
        for task in &mut self.onboarding_tasks {
            task.completed = false;
        }
    }
}

/// Case-insensitive name/publisher filter. Pure in cache and query: an
/// empty query reproduces the unfiltered list.
#[must_use]
pub fn filter_software<'a>(list: &'a [SoftwareEntry], query: &str) -> Vec<&'a SoftwareEntry> {
    let query = query.to_lowercase();
    list.iter()
        .filter(|sw| {
            sw.name.to_lowercase().contains(&query)
                || sw
                    .publisher
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&query))
        })
        .collect()
}

/// Case-insensitive name/display-name filter for services.
#[must_use]
pub fn filter_services<'a>(list: &'a [ServiceEntry], query: &str) -> Vec<&'a ServiceEntry> {
    let query = query.to_lowercase();
    list.iter()
        .filter(|svc| {
            svc.name.to_lowercase().contains(&query)
                || svc.display_name.to_lowercase().contains(&query)
        })
        .collect()
}

/// Local title/content/tag substring match used below the server-side
/// search threshold.
#[must_use]
pub fn filter_kb<'a>(list: &'a [KbArticle], query: &str) -> Vec<&'a KbArticle> {
    let query = query.to_lowercase();
    list.iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&query)
                || a.content.to_lowercase().contains(&query)
                || a.tags.iter().any(|t| t.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;

    fn software(name: &str, publisher: Option<&str>) -> SoftwareEntry {
        SoftwareEntry {
            name: name.to_string(),
            version: None,
            publisher: publisher.map(String::from),
        }
    }

    #[test]
    fn software_filter_is_pure() {
        let list = vec![
            software("Slack", Some("Slack Technologies")),
            software("7-Zip", Some("Igor Pavlov")),
            software("Chrome", Some("Google")),
        ];

        let hits = filter_software(&list, "goo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chrome");

        // Empty query reproduces the unfiltered list
        let all = filter_software(&list, "");
        assert_eq!(all.len(), list.len());
    }

    #[test]
    fn service_filter_matches_both_names() {
        let list = vec![
            ServiceEntry {
                name: "wuauserv".to_string(),
                display_name: "Windows Update".to_string(),
                status: "Running".to_string(),
                start_type: "Automatic".to_string(),
            },
            ServiceEntry {
                name: "spooler".to_string(),
                display_name: "Print Spooler".to_string(),
                status: "Stopped".to_string(),
                start_type: "Manual".to_string(),
            },
        ];

        assert_eq!(filter_services(&list, "update").len(), 1);
        assert_eq!(filter_services(&list, "SPOOL").len(), 1);
        assert_eq!(filter_services(&list, "").len(), 2);
    }

    #[test]
    fn kb_filter_searches_tags() {
        let list = vec![KbArticle {
            id: 7,
            title: "VPN setup".to_string(),
            content: "Install the client".to_string(),
            category: "Network".to_string(),
            tags: vec!["remote".to_string(), "vpn".to_string()],
        }];
        assert_eq!(filter_kb(&list, "remote").len(), 1);
        assert!(filter_kb(&list, "printer").is_empty());
    }

    #[test]
    fn navigation_is_idempotent() {
        let mut state = AppState::new();
        state.navigate(Section::Tickets);
        let first = (state.current_section, state.section_index);
        state.navigate(Section::Tickets);
        assert_eq!((state.current_section, state.section_index), first);
    }

    #[test]
    fn section_cycling_wraps() {
        let mut state = AppState::new();
        state.prev_section();
        assert_eq!(state.current_section, Section::Experimental);
        state.next_section();
        assert_eq!(state.current_section, Section::Dashboard);
    }

    #[test]
    fn stale_completion_dropped() {
        let mut state = AppState::new();
        let old = state.issue(Resource::Tickets);
        let new = state.issue(Resource::Tickets);

        // Newer request completes first
        let newer_done = FetchDone {
            kind: ResourceKind::Tickets,
            seq: new.seq,
            result: Ok(Payload::Tickets(vec![Ticket {
                id: "2".to_string(),
                ..Ticket::default()
            }])),
        };
        assert!(state.apply(newer_done, FailurePolicy::Keep).is_none());

        // Older completion arrives late and must not overwrite
        let stale_done = FetchDone {
            kind: ResourceKind::Tickets,
            seq: old.seq,
            result: Ok(Payload::Tickets(vec![Ticket {
                id: "1".to_string(),
                ..Ticket::default()
            }])),
        };
        assert!(state.apply(stale_done, FailurePolicy::Keep).is_none());

        assert_eq!(state.tickets.len(), 1);
        assert_eq!(state.tickets[0].id, "2");
    }

    #[test]
    fn keep_policy_preserves_stale_cache() {
        let mut state = AppState::new();
        let job = state.issue(Resource::SystemHealth);
        state.apply(
            FetchDone {
                kind: ResourceKind::SystemHealth,
                seq: job.seq,
                result: Ok(Payload::SystemHealth(SystemHealth::default())),
            },
            FailurePolicy::Keep,
        );
        assert!(state.health.is_some());

        let job = state.issue(Resource::SystemHealth);
        let message = state.apply(
            FetchDone {
                kind: ResourceKind::SystemHealth,
                seq: job.seq,
                result: Err(ConsoleError::Api("connection refused".to_string())),
            },
            FailurePolicy::Keep,
        );

        // Stat tiles keep their previous values; the failure is surfaced
        assert!(message.unwrap().contains("connection refused"));
        assert!(state.health.is_some());
        assert!(matches!(
            state.load_state(ResourceKind::SystemHealth),
            LoadState::Failed(_)
        ));
    }

    #[test]
    fn clear_policy_drops_cache() {
        let mut state = AppState::new();
        let job = state.issue(Resource::SystemHealth);
        state.apply(
            FetchDone {
                kind: ResourceKind::SystemHealth,
                seq: job.seq,
                result: Ok(Payload::SystemHealth(SystemHealth::default())),
            },
            FailurePolicy::Clear,
        );

        let job = state.issue(Resource::SystemHealth);
        state.apply(
            FetchDone {
                kind: ResourceKind::SystemHealth,
                seq: job.seq,
                result: Err(ConsoleError::Api("boom".to_string())),
            },
            FailurePolicy::Clear,
        );
        assert!(state.health.is_none());
    }

    #[test]
    fn ticket_status_filter() {
        let mut state = AppState::new();
        state.tickets = vec![
            Ticket {
                id: "1".to_string(),
                status: TicketStatus::Open,
                ..Ticket::default()
            },
            Ticket {
                id: "2".to_string(),
                status: TicketStatus::Resolved,
                ..Ticket::default()
            },
        ];

        assert_eq!(state.filtered_tickets().len(), 2);
        state.ticket_filter = Some(TicketStatus::Resolved);
        let filtered = state.filtered_tickets();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn onboarding_toggle_and_reset() {
        let mut state = AppState::new();
        state.onboarding_tasks = vec![
            OnboardingTask {
                id: 1,
                task: "Create AD account".to_string(),
                category: "Account Setup".to_string(),
                completed: false,
            },
            OnboardingTask {
                id: 2,
                task: "Provision laptop".to_string(),
                category: "Hardware".to_string(),
                completed: false,
            },
        ];

        state.toggle_onboarding_task(2);
        assert_eq!(state.onboarding_progress(), (1, 2));

        state.toggle_onboarding_task(2);
        assert_eq!(state.onboarding_progress(), (0, 2));

        state.toggle_onboarding_task(1);
        state.toggle_onboarding_task(2);
        state.reset_onboarding();
        assert_eq!(state.onboarding_progress(), (0, 2));
    }
}
