//! Blocking HTTP client for the help-desk backend.
//!
//! The upstream API is inconsistent about envelopes: most endpoints wrap
//! payloads as `{"status": "success", "data": ...}`, the AD and remote
//! endpoints use `{"success": bool, ...}`, and a handful return the
//! payload bare (`{"articles": [...]}`, `{"tasks": [...]}`). All three
//! shapes are normalized here, at one boundary, so every loader sees a
//! single `Result` contract.

use crate::error::{ConsoleError, Result};
use crate::model::*;
use serde_json::Value;
use std::time::Duration;

/// Connect/read timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    base: String,
    http: reqwest::blocking::Client,
}

/// Collapses the three upstream envelope shapes into one contract.
///
/// * `{"status": "success", "data": ...}` yields `data` (or the rest of
///   the body when `data` is absent).
/// * `{"status": <anything else>}` is an API error carrying `message`.
/// * `{"success": true, ...}` yields the body itself; `false` is an error.
/// * A bare object or string passes through unchanged.
/// * Anything else (null, arrays at top level are fine) is rejected so a
///   malformed body surfaces as an error instead of a silent no-op.
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    if let Some(status) = body.get("status").and_then(Value::as_str) {
        if status == "success" {
            return Ok(body.get("data").cloned().unwrap_or(body));
        }
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(ConsoleError::Api(message));
    }

    if let Some(success) = body.get("success").and_then(Value::as_bool) {
        if success {
            return Ok(body);
        }
        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(ConsoleError::Api(message));
    }

    match body {
        Value::Object(_) | Value::String(_) | Value::Array(_) => Ok(body),
        _ => Err(ConsoleError::Api(
            "unrecognized response envelope".to_string(),
        )),
    }
}

/// Request path for a single ticket.
#[must_use]
pub fn ticket_path(id: &str) -> String {
    format!("/api/tickets/{id}")
}

/// PUT body for a ticket status change.
#[must_use]
pub fn ticket_status_body(status: TicketStatus) -> Value {
    serde_json::json!({ "status": status.as_str() })
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn get(&self, path: &str) -> Result<Value> {
        let body = self
            .http
            .get(format!("{}{path}", self.base))
            .send()?
            .json::<Value>()?;
        unwrap_envelope(body)
    }

    fn get_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let body = self
            .http
            .get(format!("{}{path}", self.base))
            .query(query)
            .send()?
            .json::<Value>()?;
        unwrap_envelope(body)
    }

    fn post(&self, path: &str) -> Result<Value> {
        let body = self
            .http
            .post(format!("{}{path}", self.base))
            .send()?
            .json::<Value>()?;
        unwrap_envelope(body)
    }

    fn post_json(&self, path: &str, json: &Value) -> Result<Value> {
        let body = self
            .http
            .post(format!("{}{path}", self.base))
            .json(json)
            .send()?
            .json::<Value>()?;
        unwrap_envelope(body)
    }

    fn put_json(&self, path: &str, json: &Value) -> Result<Value> {
        let body = self
            .http
            .put(format!("{}{path}", self.base))
            .json(json)
            .send()?
            .json::<Value>()?;
        unwrap_envelope(body)
    }

    /// Extracts a named field from a bare-object payload.
    fn field(value: Value, name: &str) -> Value {
        match value {
            Value::Object(mut map) => map.remove(name).unwrap_or(Value::Array(Vec::new())),
            other => other,
        }
    }

    // ---------- system ----------

    pub fn system_health(&self) -> Result<SystemHealth> {
        Ok(serde_json::from_value(self.get("/api/system/health")?)?)
    }

    pub fn processes(&self) -> Result<Vec<ProcessInfo>> {
        Ok(serde_json::from_value(self.get("/api/system/processes")?)?)
    }

    pub fn startup_programs(&self) -> Result<Vec<StartupProgram>> {
        Ok(serde_json::from_value(self.get("/api/system/startup")?)?)
    }

    // ---------- security ----------

    pub fn security_status(&self) -> Result<SecurityStatus> {
        Ok(serde_json::from_value(self.get("/api/security/status")?)?)
    }

    // ---------- network ----------

    pub fn network_info(&self) -> Result<NetworkInfo> {
        Ok(serde_json::from_value(self.get("/api/network/info")?)?)
    }

    pub fn wifi_status(&self) -> Result<WifiStatus> {
        Ok(serde_json::from_value(self.get("/api/network/wifi")?)?)
    }

    pub fn ping(&self, target: &str) -> Result<PingResult> {
        let value = self.get_query("/api/network/ping", &[("target", target)])?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn dns_lookup(&self, domain: &str) -> Result<DnsResult> {
        let value = self.get_query("/api/network/dns", &[("domain", domain)])?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn port_check(&self, host: &str, port: u16) -> Result<PortCheckResult> {
        let port = port.to_string();
        let value = self.get_query("/api/network/port-check", &[("host", host), ("port", &port)])?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn traceroute(&self, target: &str) -> Result<TracerouteResult> {
        let value = self.get_query("/api/network/traceroute", &[("target", target)])?;
        Ok(serde_json::from_value(value)?)
    }

    /// Raw `ipconfig` style output, rendered verbatim.
    pub fn ipconfig(&self) -> Result<String> {
        let value = self.get("/api/network/ipconfig")?;
        Ok(match value {
            Value::String(s) => s,
            other => serde_json::to_string_pretty(&other)?,
        })
    }

    // ---------- devices ----------

    pub fn printers(&self) -> Result<Vec<PeripheralDevice>> {
        Ok(serde_json::from_value(self.get("/api/devices/printers")?)?)
    }

    pub fn audio_devices(&self) -> Result<Vec<PeripheralDevice>> {
        Ok(serde_json::from_value(self.get("/api/devices/audio")?)?)
    }

    pub fn cameras(&self) -> Result<Vec<PeripheralDevice>> {
        Ok(serde_json::from_value(self.get("/api/devices/cameras")?)?)
    }

    /// Bluetooth nests its device list one level deeper than the others.
    pub fn bluetooth_devices(&self) -> Result<Vec<PeripheralDevice>> {
        let value = self.get("/api/devices/bluetooth")?;
        Ok(serde_json::from_value(Self::field(value, "devices"))?)
    }

    pub fn usb_devices(&self) -> Result<Vec<PeripheralDevice>> {
        Ok(serde_json::from_value(self.get("/api/devices/usb")?)?)
    }

    // ---------- inventory ----------

    pub fn inventory(&self) -> Result<InventoryReport> {
        Ok(serde_json::from_value(self.get("/api/inventory/device")?)?)
    }

    // ---------- tickets ----------

    pub fn tickets(&self) -> Result<Vec<Ticket>> {
        Ok(serde_json::from_value(self.get("/api/tickets")?)?)
    }

    /// Creates a ticket and returns its server-assigned id.
    pub fn create_ticket(&self, ticket: &NewTicket) -> Result<String> {
        let value = self.post_json("/api/tickets", &serde_json::to_value(ticket)?)?;
        let id = value
            .get("id")
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        Ok(id)
    }

    pub fn update_ticket_status(&self, id: &str, status: TicketStatus) -> Result<()> {
        self.put_json(&ticket_path(id), &ticket_status_body(status))?;
        Ok(())
    }

    // ---------- knowledge base ----------

    pub fn knowledge_base(&self) -> Result<Vec<KbArticle>> {
        let value = self.get("/api/knowledge-base")?;
        Ok(serde_json::from_value(Self::field(value, "articles"))?)
    }

    pub fn kb_search(&self, query: &str) -> Result<Vec<KbArticle>> {
        let value = self.get_query("/api/knowledge-base/search", &[("q", query)])?;
        Ok(serde_json::from_value(Self::field(value, "articles"))?)
    }

    pub fn kb_article(&self, id: u64) -> Result<KbArticle> {
        Ok(serde_json::from_value(
            self.get(&format!("/api/knowledge-base/{id}"))?,
        )?)
    }

    // ---------- AD users ----------

    pub fn ad_search(&self, query: &str) -> Result<Vec<AdUser>> {
        let value = self.get_query("/api/ad/search", &[("q", query)])?;
        Ok(serde_json::from_value(Self::field(value, "users"))?)
    }

    pub fn ad_reset_password(&self, username: &str) -> Result<PasswordReset> {
        let value = self.post(&format!("/api/ad/reset-password/{username}"))?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn ad_unlock(&self, username: &str) -> Result<()> {
        self.post(&format!("/api/ad/unlock/{username}"))?;
        Ok(())
    }

    // ---------- onboarding ----------

    pub fn onboarding_checklist(&self) -> Result<Vec<OnboardingTask>> {
        let value = self.get("/api/onboarding/checklist")?;
        Ok(serde_json::from_value(Self::field(value, "tasks"))?)
    }

    // ---------- services ----------

    pub fn services(&self) -> Result<Vec<ServiceEntry>> {
        let value = self.get("/api/services")?;
        Ok(serde_json::from_value(Self::field(value, "services"))?)
    }

    pub fn critical_services(&self) -> Result<Vec<ServiceEntry>> {
        let value = self.get("/api/services/critical")?;
        Ok(serde_json::from_value(Self::field(value, "services"))?)
    }

    // ---------- compliance ----------

    pub fn compliance_check(&self) -> Result<ComplianceReport> {
        Ok(serde_json::from_value(self.get("/api/compliance/check")?)?)
    }

    // ---------- remote & tools ----------

    pub fn launch_rdp(&self, target: &str) -> Result<()> {
        self.post_json("/api/remote/rdp", &serde_json::json!({ "target": target }))?;
        Ok(())
    }

    pub fn clear_browser_cache(&self) -> Result<BrowserCacheResult> {
        Ok(serde_json::from_value(self.post("/api/tools/browser-cache")?)?)
    }

    pub fn network_reset(&self) -> Result<()> {
        self.post("/api/tools/network-reset")?;
        Ok(())
    }

    pub fn flush_dns(&self) -> Result<()> {
        self.post("/api/tools/flush-dns")?;
        Ok(())
    }

    pub fn error_logs(&self) -> Result<Vec<ErrorLogEntry>> {
        Ok(serde_json::from_value(self.get("/api/tools/error-logs")?)?)
    }

    // ---------- experimental & reports ----------

    pub fn speed_test(&self) -> Result<SpeedTestResult> {
        Ok(serde_json::from_value(
            self.get("/api/experimental/speed-test")?,
        )?)
    }

    pub fn network_scan(&self) -> Result<NetworkScanResult> {
        Ok(serde_json::from_value(
            self.get("/api/experimental/network-scan")?,
        )?)
    }

    pub fn generate_report(&self, kind: &str) -> Result<GeneratedReport> {
        let value = self.get_query("/api/reports/generate", &[("type", kind)])?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_envelope_unwraps_data() {
        let body = json!({"status": "success", "data": {"cpu": 1}});
        let value = unwrap_envelope(body).unwrap();
        assert_eq!(value, json!({"cpu": 1}));
    }

    #[test]
    fn status_error_carries_message() {
        let body = json!({"status": "error", "message": "boom"});
        let err = unwrap_envelope(body).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn success_envelope_passes_body_through() {
        let body = json!({"success": true, "temp_password": "Xy9!"});
        let value = unwrap_envelope(body).unwrap();
        assert_eq!(value["temp_password"], "Xy9!");
    }

    #[test]
    fn success_false_is_an_error() {
        let body = json!({"success": false, "error": "locked out"});
        let err = unwrap_envelope(body).unwrap_err();
        assert!(err.to_string().contains("locked out"));
    }

    #[test]
    fn bare_object_passes_through() {
        let body = json!({"articles": [{"id": 1}]});
        let value = unwrap_envelope(body).unwrap();
        assert_eq!(value["articles"][0]["id"], 1);
    }

    #[test]
    fn null_body_rejected() {
        assert!(unwrap_envelope(serde_json::Value::Null).is_err());
    }

    #[test]
    fn ticket_request_shapes() {
        assert_eq!(ticket_path("1"), "/api/tickets/1");
        assert_eq!(
            ticket_status_body(TicketStatus::Resolved),
            json!({"status": "resolved"})
        );
        assert_eq!(
            ticket_status_body(TicketStatus::InProgress),
            json!({"status": "in-progress"})
        );
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
