//! Typed payloads for every backend resource.
//!
//! The backend assembles these objects ad hoc, so most fields carry
//! `#[serde(default)]`: a missing field renders as its empty value rather
//! than failing the whole panel.

use serde::{Deserialize, Serialize};

// ---------- system ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub os: OsInfo,
    #[serde(default)]
    pub cpu: CpuInfo,
    #[serde(default)]
    pub memory: MemoryInfo,
    #[serde(default)]
    pub disks: Vec<DiskInfo>,
    #[serde(default)]
    pub battery: Option<BatteryInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsInfo {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub machine: String,
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub boot_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CpuInfo {
    #[serde(default)]
    pub physical_cores: u32,
    #[serde(default)]
    pub logical_cores: u32,
    #[serde(default)]
    pub usage_percent: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryInfo {
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub total_gb: f64,
    #[serde(default)]
    pub used_gb: f64,
    #[serde(default)]
    pub available_gb: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiskInfo {
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub mountpoint: String,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub total_gb: f64,
    #[serde(default)]
    pub free_gb: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatteryInfo {
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub power_plugged: bool,
    #[serde(default)]
    pub time_left: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cpu_percent: f64,
    #[serde(default)]
    pub memory_percent: f64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartupProgram {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

// ---------- security ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityStatus {
    #[serde(default)]
    pub defender: DefenderStatus,
    #[serde(default)]
    pub firewall: FirewallStatus,
    #[serde(default)]
    pub updates: UpdateStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefenderStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub real_time: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirewallStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatus {
    #[serde(default)]
    pub last_update: Option<String>,
}

impl SecurityStatus {
    /// Weighted posture score, 0-100. Mirrors the dashboard scoring:
    /// antivirus 30, real-time protection 25, firewall 30, recent updates 15.
    #[must_use]
    pub fn score(&self) -> u32 {
        let mut score = 0;
        if self.defender.status == "Enabled" {
            score += 30;
        }
        if self.defender.real_time {
            score += 25;
        }
        if self.firewall.enabled {
            score += 30;
        }
        if matches!(&self.updates.last_update, Some(s) if s != "Unknown") {
            score += 15;
        }
        score
    }

    #[must_use]
    pub fn score_label(&self) -> &'static str {
        match self.score() {
            80..=100 => "Excellent",
            60..=79 => "Good",
            40..=59 => "Fair",
            _ => "Poor",
        }
    }
}

// ---------- network ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkInfo {
    #[serde(default)]
    pub local_ip: String,
    #[serde(default)]
    pub public_ip: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub stats: NetworkByteStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkByteStats {
    #[serde(default)]
    pub bytes_sent: u64,
    #[serde(default)]
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WifiStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub speed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PingResult {
    #[serde(default)]
    pub reachable: bool,
    #[serde(default)]
    pub output: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnsResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub resolved_ip: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortCheckResult {
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracerouteResult {
    #[serde(default)]
    pub output: String,
}

// ---------- devices ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeripheralDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub driver: Option<String>,
}

// ---------- inventory ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryReport {
    #[serde(default)]
    pub hardware: HardwareInventory,
    #[serde(default)]
    pub browsers: Vec<BrowserEntry>,
    #[serde(default)]
    pub software: Vec<SoftwareEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HardwareInventory {
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub ram_gb: f64,
    #[serde(default)]
    pub architecture: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowserEntry {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoftwareEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
}

// ---------- tickets ----------

/// Ticket lifecycle state. Transitions are unrestricted; every change is a
/// PUT followed by a full list reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
}

impl TicketStatus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Open => Self::InProgress,
            Self::InProgress => Self::Resolved,
            Self::Resolved => Self::Open,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub created: String,
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub user: String,
}

// ---------- knowledge base ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KbArticle {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ---------- AD users ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_login: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordReset {
    #[serde(default)]
    pub temp_password: String,
}

// ---------- onboarding ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingTask {
    pub id: u64,
    pub task: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

// ---------- services ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub start_type: String,
}

// ---------- compliance ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceReport {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub checks: Vec<ComplianceCheck>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceCheck {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
}

impl ComplianceReport {
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        let passed = self.checks.iter().filter(|c| c.status == "passed").count();
        let failed = self.checks.iter().filter(|c| c.status == "failed").count();
        let warned = self.checks.iter().filter(|c| c.status == "warning").count();
        (passed, failed, warned)
    }
}

// ---------- tools & experimental ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrowserCacheResult {
    #[serde(default)]
    pub browsers_cleaned: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorLogEntry {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeedTestResult {
    #[serde(default)]
    pub download_speed_mbps: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkScanResult {
    #[serde(default)]
    pub local_ip: String,
    #[serde(default)]
    pub devices: Vec<ScannedDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScannedDevice {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub mac: String,
}

// ---------- reports ----------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedReport {
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub device_name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub sections: ReportSections,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSections {
    #[serde(default)]
    pub system: ReportSystem,
    #[serde(default)]
    pub disks: Vec<ReportDisk>,
    #[serde(default)]
    pub network: ReportNetwork,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportSystem {
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub cpu_usage: String,
    #[serde(default)]
    pub memory_usage: String,
    #[serde(default)]
    pub memory_available: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportDisk {
    #[serde(default)]
    pub drive: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub free: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportNetwork {
    #[serde(default)]
    pub local_ip: String,
    #[serde(default)]
    pub hostname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_status_serde_names() {
        let t: Ticket = serde_json::from_str(
            r#"{"id":"1","title":"Printer jam","status":"in-progress","priority":"high","user":"jdoe","created":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(t.status, TicketStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&TicketStatus::Resolved).unwrap(),
            "\"resolved\""
        );
    }

    #[test]
    fn ticket_status_cycles() {
        assert_eq!(TicketStatus::Open.next(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::InProgress.next(), TicketStatus::Resolved);
        assert_eq!(TicketStatus::Resolved.next(), TicketStatus::Open);
    }

    #[test]
    fn security_score_weights() {
        let mut status = SecurityStatus::default();
        assert_eq!(status.score(), 0);
        assert_eq!(status.score_label(), "Poor");

        status.defender.status = "Enabled".to_string();
        status.defender.real_time = true;
        status.firewall.enabled = true;
        status.updates.last_update = Some("2024-05-01".to_string());
        assert_eq!(status.score(), 100);
        assert_eq!(status.score_label(), "Excellent");

        status.updates.last_update = Some("Unknown".to_string());
        assert_eq!(status.score(), 85);
    }

    #[test]
    fn health_tolerates_missing_fields() {
        let health: SystemHealth =
            serde_json::from_str(r#"{"cpu":{"usage_percent":42.5}}"#).unwrap();
        assert!((health.cpu.usage_percent - 42.5).abs() < f64::EPSILON);
        assert!(health.disks.is_empty());
        assert!(health.battery.is_none());
    }

    #[test]
    fn compliance_counts() {
        let report: ComplianceReport = serde_json::from_str(
            r#"{"score":66,"checks":[
                {"name":"a","description":"","status":"passed"},
                {"name":"b","description":"","status":"failed"},
                {"name":"c","description":"","status":"warning"},
                {"name":"d","description":"","status":"passed"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(report.counts(), (2, 1, 1));
    }
}
