//! Background fetch worker.
//!
//! The UI thread never blocks on the network: it enqueues [`FetchJob`]s
//! over a channel and drains [`FetchDone`] completions each loop tick. A
//! job carries a per-resource sequence number; completions older than the
//! latest issued sequence for that resource are dropped on application,
//! so the last *initiated* request determines final rendered state even
//! when completions arrive out of order.

use crate::client::ApiClient;
use crate::error::Result;
use crate::model::*;
use std::sync::mpsc::{Receiver, Sender};

/// One fetchable resource, with whatever parameters the request needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    SystemHealth,
    Processes,
    StartupPrograms,
    SecurityStatus,
    NetworkInfo,
    WifiStatus,
    Printers,
    AudioDevices,
    Cameras,
    Bluetooth,
    UsbDevices,
    Inventory,
    Tickets,
    KnowledgeBase,
    KbSearch { query: String },
    KbArticle { id: u64 },
    AdSearch { query: String },
    OnboardingChecklist,
    Services,
    CriticalServices,
    Compliance,
    Ping { target: String },
    Dns { domain: String },
    PortCheck { host: String, port: u16 },
    Traceroute { target: String },
    Ipconfig,
    ErrorLogs,
    SpeedTest,
    NetworkScan,
    Report { kind: String },
}

/// Parameter-free key used for sequencing and load-state tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    SystemHealth,
    Processes,
    StartupPrograms,
    SecurityStatus,
    NetworkInfo,
    WifiStatus,
    Printers,
    AudioDevices,
    Cameras,
    Bluetooth,
    UsbDevices,
    Inventory,
    Tickets,
    KnowledgeBase,
    KbSearch,
    KbArticle,
    AdSearch,
    OnboardingChecklist,
    Services,
    CriticalServices,
    Compliance,
    Ping,
    Dns,
    PortCheck,
    Traceroute,
    Ipconfig,
    ErrorLogs,
    SpeedTest,
    NetworkScan,
    Report,
}

impl Resource {
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::SystemHealth => ResourceKind::SystemHealth,
            Self::Processes => ResourceKind::Processes,
            Self::StartupPrograms => ResourceKind::StartupPrograms,
            Self::SecurityStatus => ResourceKind::SecurityStatus,
            Self::NetworkInfo => ResourceKind::NetworkInfo,
            Self::WifiStatus => ResourceKind::WifiStatus,
            Self::Printers => ResourceKind::Printers,
            Self::AudioDevices => ResourceKind::AudioDevices,
            Self::Cameras => ResourceKind::Cameras,
            Self::Bluetooth => ResourceKind::Bluetooth,
            Self::UsbDevices => ResourceKind::UsbDevices,
            Self::Inventory => ResourceKind::Inventory,
            Self::Tickets => ResourceKind::Tickets,
            Self::KnowledgeBase => ResourceKind::KnowledgeBase,
            Self::KbSearch { .. } => ResourceKind::KbSearch,
            Self::KbArticle { .. } => ResourceKind::KbArticle,
            Self::AdSearch { .. } => ResourceKind::AdSearch,
            Self::OnboardingChecklist => ResourceKind::OnboardingChecklist,
            Self::Services => ResourceKind::Services,
            Self::CriticalServices => ResourceKind::CriticalServices,
            Self::Compliance => ResourceKind::Compliance,
            Self::Ping { .. } => ResourceKind::Ping,
            Self::Dns { .. } => ResourceKind::Dns,
            Self::PortCheck { .. } => ResourceKind::PortCheck,
            Self::Traceroute { .. } => ResourceKind::Traceroute,
            Self::Ipconfig => ResourceKind::Ipconfig,
            Self::ErrorLogs => ResourceKind::ErrorLogs,
            Self::SpeedTest => ResourceKind::SpeedTest,
            Self::NetworkScan => ResourceKind::NetworkScan,
            Self::Report { .. } => ResourceKind::Report,
        }
    }

    /// Short human label for toasts and the session log.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }
}

impl ResourceKind {
    /// Short human label for toasts and the session log.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::SystemHealth => "system health",
            ResourceKind::Processes => "processes",
            ResourceKind::StartupPrograms => "startup programs",
            ResourceKind::SecurityStatus => "security status",
            ResourceKind::NetworkInfo => "network info",
            ResourceKind::WifiStatus => "wifi status",
            ResourceKind::Printers => "printers",
            ResourceKind::AudioDevices => "audio devices",
            ResourceKind::Cameras => "cameras",
            ResourceKind::Bluetooth => "bluetooth devices",
            ResourceKind::UsbDevices => "usb devices",
            ResourceKind::Inventory => "inventory",
            ResourceKind::Tickets => "tickets",
            ResourceKind::KnowledgeBase | ResourceKind::KbSearch => "knowledge base",
            ResourceKind::KbArticle => "knowledge base article",
            ResourceKind::AdSearch => "AD users",
            ResourceKind::OnboardingChecklist => "onboarding checklist",
            ResourceKind::Services => "services",
            ResourceKind::CriticalServices => "critical services",
            ResourceKind::Compliance => "compliance check",
            ResourceKind::Ping => "ping",
            ResourceKind::Dns => "DNS lookup",
            ResourceKind::PortCheck => "port check",
            ResourceKind::Traceroute => "traceroute",
            ResourceKind::Ipconfig => "ipconfig",
            ResourceKind::ErrorLogs => "error logs",
            ResourceKind::SpeedTest => "speed test",
            ResourceKind::NetworkScan => "network scan",
            ResourceKind::Report => "report",
        }
    }
}

/// Typed result of a completed fetch.
#[derive(Debug, Clone)]
pub enum Payload {
    SystemHealth(SystemHealth),
    Processes(Vec<ProcessInfo>),
    StartupPrograms(Vec<StartupProgram>),
    SecurityStatus(SecurityStatus),
    NetworkInfo(NetworkInfo),
    WifiStatus(WifiStatus),
    Printers(Vec<PeripheralDevice>),
    AudioDevices(Vec<PeripheralDevice>),
    Cameras(Vec<PeripheralDevice>),
    Bluetooth(Vec<PeripheralDevice>),
    UsbDevices(Vec<PeripheralDevice>),
    Inventory(InventoryReport),
    Tickets(Vec<Ticket>),
    KnowledgeBase(Vec<KbArticle>),
    KbArticleDetail(KbArticle),
    AdUsers(Vec<AdUser>),
    OnboardingChecklist(Vec<OnboardingTask>),
    Services(Vec<ServiceEntry>),
    CriticalServices(Vec<ServiceEntry>),
    Compliance(ComplianceReport),
    Ping(PingResult),
    Dns(DnsResult),
    PortCheck(PortCheckResult),
    Traceroute(TracerouteResult),
    Ipconfig(String),
    ErrorLogs(Vec<ErrorLogEntry>),
    SpeedTest(SpeedTestResult),
    NetworkScan(NetworkScanResult),
    Report(GeneratedReport),
}

#[derive(Debug, Clone)]
pub struct FetchJob {
    pub resource: Resource,
    pub seq: u64,
}

#[derive(Debug)]
pub struct FetchDone {
    pub kind: ResourceKind,
    pub seq: u64,
    pub result: Result<Payload>,
}

fn perform(client: &ApiClient, resource: &Resource) -> Result<Payload> {
    Ok(match resource {
        Resource::SystemHealth => Payload::SystemHealth(client.system_health()?),
        Resource::Processes => Payload::Processes(client.processes()?),
        Resource::StartupPrograms => Payload::StartupPrograms(client.startup_programs()?),
        Resource::SecurityStatus => Payload::SecurityStatus(client.security_status()?),
        Resource::NetworkInfo => Payload::NetworkInfo(client.network_info()?),
        Resource::WifiStatus => Payload::WifiStatus(client.wifi_status()?),
        Resource::Printers => Payload::Printers(client.printers()?),
        Resource::AudioDevices => Payload::AudioDevices(client.audio_devices()?),
        Resource::Cameras => Payload::Cameras(client.cameras()?),
        Resource::Bluetooth => Payload::Bluetooth(client.bluetooth_devices()?),
        Resource::UsbDevices => Payload::UsbDevices(client.usb_devices()?),
        Resource::Inventory => Payload::Inventory(client.inventory()?),
        Resource::Tickets => Payload::Tickets(client.tickets()?),
        Resource::KnowledgeBase => Payload::KnowledgeBase(client.knowledge_base()?),
        Resource::KbSearch { query } => Payload::KnowledgeBase(client.kb_search(query)?),
        Resource::KbArticle { id } => Payload::KbArticleDetail(client.kb_article(*id)?),
        Resource::AdSearch { query } => Payload::AdUsers(client.ad_search(query)?),
        Resource::OnboardingChecklist => {
            Payload::OnboardingChecklist(client.onboarding_checklist()?)
        }
        Resource::Services => Payload::Services(client.services()?),
        Resource::CriticalServices => Payload::CriticalServices(client.critical_services()?),
        Resource::Compliance => Payload::Compliance(client.compliance_check()?),
        Resource::Ping { target } => Payload::Ping(client.ping(target)?),
        Resource::Dns { domain } => Payload::Dns(client.dns_lookup(domain)?),
        Resource::PortCheck { host, port } => Payload::PortCheck(client.port_check(host, *port)?),
        Resource::Traceroute { target } => Payload::Traceroute(client.traceroute(target)?),
        Resource::Ipconfig => Payload::Ipconfig(client.ipconfig()?),
        Resource::ErrorLogs => Payload::ErrorLogs(client.error_logs()?),
        Resource::SpeedTest => Payload::SpeedTest(client.speed_test()?),
        Resource::NetworkScan => Payload::NetworkScan(client.network_scan()?),
        Resource::Report { kind } => Payload::Report(client.generate_report(kind)?),
    })
}

/// Runs fetch jobs until the job channel closes. Owns the HTTP client;
/// the sender half living on the UI thread keeps the worker alive.
pub fn run_worker(client: ApiClient, jobs: Receiver<FetchJob>, done: Sender<FetchDone>) {
    while let Ok(job) = jobs.recv() {
        let result = perform(&client, &job.resource);
        let completed = FetchDone {
            kind: job.resource.kind(),
            seq: job.seq,
            result,
        };
        if done.send(completed).is_err() {
            break;
        }
    }
}

/// Spawns the worker thread and returns its channel endpoints.
pub fn spawn_worker(client: ApiClient) -> (Sender<FetchJob>, Receiver<FetchDone>) {
    let (job_tx, job_rx) = std::sync::mpsc::channel();
    let (done_tx, done_rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || run_worker(client, job_rx, done_tx));
    (job_tx, done_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strips_parameters() {
        let a = Resource::Ping {
            target: "8.8.8.8".to_string(),
        };
        let b = Resource::Ping {
            target: "1.1.1.1".to_string(),
        };
        assert_eq!(a.kind(), b.kind());
        assert_ne!(a.kind(), Resource::Tickets.kind());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(Resource::SystemHealth.label(), "system health");
        assert_eq!(
            Resource::KbSearch {
                query: "vpn".to_string()
            }
            .label(),
            "knowledge base"
        );
    }
}
