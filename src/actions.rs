//! Action handlers: validate input, perform the mutating request, toast
//! the outcome, record an audit entry, and name the loaders to re-run.
//!
//! Handlers run blocking on the UI thread (user-initiated and short) and
//! return the resources whose caches must be reloaded so the caller can
//! enqueue them through the fetch worker.

use crate::client::ApiClient;
use crate::fetch::Resource;
use crate::logger::SessionLogger;
use crate::model::{NewTicket, TicketStatus};
use crate::notify::{ModalSlot, ToastQueue};
use crate::storage::LocalStore;
use crate::store::AppState;
use crate::validation;

pub struct ActionCtx<'a> {
    pub client: &'a ApiClient,
    pub state: &'a mut AppState,
    pub toasts: &'a mut ToastQueue,
    pub modal: &'a mut ModalSlot,
    pub store: &'a mut LocalStore,
    pub log: &'a mut SessionLogger,
}

// ---------- tickets ----------

/// Creates a ticket; on success the list is re-fetched rather than
/// patched locally.
pub fn create_ticket(ctx: &mut ActionCtx, ticket: NewTicket) -> Vec<Resource> {
    if ticket.title.trim().is_empty() || ticket.user.trim().is_empty() {
        ctx.toasts.error("Error", "Title and user are required");
        return Vec::new();
    }

    match ctx.client.create_ticket(&ticket) {
        Ok(id) => {
            ctx.toasts
                .success("Success!", &format!("Ticket #{id} created"));
            ctx.log.action(&format!("ticket #{id} created"));
            let _ = ctx.store.add_audit_entry("Ticket Created", &id, "success");
            vec![Resource::Tickets]
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to create ticket");
            ctx.log.warn(&format!("ticket create failed: {err}"));
            Vec::new()
        }
    }
}

/// PUTs the new status, then reloads the full ticket list. No optimistic
/// update: the row only changes once the reload lands.
pub fn update_ticket_status(ctx: &mut ActionCtx, id: &str, status: TicketStatus) -> Vec<Resource> {
    match ctx.client.update_ticket_status(id, status) {
        Ok(()) => {
            ctx.toasts.success(
                "Updated",
                &format!("Ticket #{id} status changed to {}", status.as_str()),
            );
            ctx.log
                .action(&format!("ticket #{id} status changed to {}", status.as_str()));
            let _ = ctx
                .store
                .add_audit_entry("Ticket Status", &format!("#{id} -> {}", status.as_str()), "success");
            vec![Resource::Tickets]
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to update ticket");
            ctx.log.warn(&format!("ticket #{id} update failed: {err}"));
            Vec::new()
        }
    }
}

// ---------- AD users ----------

pub fn search_ad_users(ctx: &mut ActionCtx, query: &str) -> Vec<Resource> {
    let query = query.trim();
    if query.len() < validation::MIN_SEARCH_LEN {
        ctx.toasts
            .info("AD Search", "Enter at least 2 characters to search");
        return Vec::new();
    }
    if validation::validate_query(query).is_err() {
        ctx.toasts.error("Error", "Invalid search query");
        return Vec::new();
    }

    vec![Resource::AdSearch {
        query: query.to_string(),
    }]
}

/// Resets the selected user's password and shows the temporary password
/// in the modal.
pub fn reset_user_password(ctx: &mut ActionCtx) -> Vec<Resource> {
    let Some(username) = ctx.state.selected_ad_user.clone() else {
        ctx.toasts.error("Error", "No user selected");
        return Vec::new();
    };
    if validation::validate_username(&username).is_err() {
        ctx.toasts.error("Error", "Invalid username");
        return Vec::new();
    }

    match ctx.client.ad_reset_password(&username) {
        Ok(reset) => {
            ctx.modal.open(
                "Password Reset",
                vec![
                    format!("User: {username}"),
                    format!("Temporary password: {}", reset.temp_password),
                    String::new(),
                    "User must change password on next login.".to_string(),
                ],
                "Esc to close",
            );
            ctx.log.action(&format!("password reset for {username}"));
            let _ = ctx
                .store
                .add_audit_entry("Password Reset", &username, "success");
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to reset password");
            ctx.log
                .warn(&format!("password reset for {username} failed: {err}"));
        }
    }
    Vec::new()
}

/// Unlocks the selected account, then refreshes the search results.
pub fn unlock_user_account(ctx: &mut ActionCtx, last_query: &str) -> Vec<Resource> {
    let Some(username) = ctx.state.selected_ad_user.clone() else {
        ctx.toasts.error("Error", "No user selected");
        return Vec::new();
    };
    if validation::validate_username(&username).is_err() {
        ctx.toasts.error("Error", "Invalid username");
        return Vec::new();
    }

    match ctx.client.ad_unlock(&username) {
        Ok(()) => {
            ctx.toasts.success(
                "Account Unlocked",
                &format!("Account for {username} has been unlocked"),
            );
            ctx.log.action(&format!("account unlock for {username}"));
            let _ = ctx
                .store
                .add_audit_entry("Account Unlock", &username, "success");
            if last_query.len() >= validation::MIN_SEARCH_LEN {
                return vec![Resource::AdSearch {
                    query: last_query.to_string(),
                }];
            }
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to unlock account");
            ctx.log
                .warn(&format!("account unlock for {username} failed: {err}"));
        }
    }
    Vec::new()
}

// ---------- onboarding ----------

/// Saves checklist progress to the local store; the server copy is never
/// updated per-toggle, only this explicit save persists anything.
pub fn save_onboarding_progress(ctx: &mut ActionCtx) {
    let employee = if ctx.state.onboarding_employee.trim().is_empty() {
        "New Employee".to_string()
    } else {
        ctx.state.onboarding_employee.clone()
    };

    match ctx.store.save_onboarding(&employee, &ctx.state.onboarding_tasks) {
        Ok(()) => ctx
            .toasts
            .success("Saved", "Onboarding progress saved successfully"),
        Err(err) => {
            ctx.toasts.error("Error", "Failed to save progress");
            ctx.log.warn(&format!("onboarding save failed: {err}"));
        }
    }
}

pub fn reset_onboarding(ctx: &mut ActionCtx) {
    ctx.state.reset_onboarding();
    ctx.toasts.info("Reset", "Checklist has been reset");
}

/// Summarizes completed and pending tasks in the modal.
pub fn onboarding_report(ctx: &mut ActionCtx) {
    let (done, total) = ctx.state.onboarding_progress();
    let mut body = vec![
        format!(
            "Employee: {}",
            if ctx.state.onboarding_employee.is_empty() {
                "New Employee"
            } else {
                &ctx.state.onboarding_employee
            }
        ),
        format!("Progress: {done} / {total} tasks completed"),
        String::new(),
        "Completed:".to_string(),
    ];
    for task in ctx.state.onboarding_tasks.iter().filter(|t| t.completed) {
        body.push(format!("  [x] {}", task.task));
    }
    body.push("Pending:".to_string());
    for task in ctx.state.onboarding_tasks.iter().filter(|t| !t.completed) {
        body.push(format!("  [ ] {}", task.task));
    }

    ctx.modal.open("Onboarding Report", body, "Esc to close");
}

// ---------- network diagnostics ----------

pub fn run_ping(ctx: &mut ActionCtx, target: &str) -> Vec<Resource> {
    if validation::validate_host(target).is_err() {
        ctx.toasts.error("Error", "Invalid ping target");
        return Vec::new();
    }
    ctx.toasts.info("Ping", &format!("Pinging {target}..."));
    vec![Resource::Ping {
        target: target.to_string(),
    }]
}

pub fn run_dns_lookup(ctx: &mut ActionCtx, domain: &str) -> Vec<Resource> {
    if validation::validate_host(domain).is_err() {
        ctx.toasts.error("Error", "Invalid domain");
        return Vec::new();
    }
    vec![Resource::Dns {
        domain: domain.to_string(),
    }]
}

pub fn run_port_check(ctx: &mut ActionCtx, host: &str, port: &str) -> Vec<Resource> {
    if validation::validate_host(host).is_err() {
        ctx.toasts.error("Error", "Invalid host");
        return Vec::new();
    }
    let port = match validation::validate_port(port) {
        Ok(p) => p,
        Err(_) => {
            ctx.toasts.error("Error", "Invalid port number");
            return Vec::new();
        }
    };
    vec![Resource::PortCheck {
        host: host.to_string(),
        port,
    }]
}

pub fn run_traceroute(ctx: &mut ActionCtx, target: &str) -> Vec<Resource> {
    if validation::validate_host(target).is_err() {
        ctx.toasts.error("Error", "Invalid traceroute target");
        return Vec::new();
    }
    ctx.toasts
        .info("Traceroute", "Running traceroute... this may take a moment");
    vec![Resource::Traceroute {
        target: target.to_string(),
    }]
}

// ---------- remote & tools ----------

pub fn launch_rdp(ctx: &mut ActionCtx, target: &str) -> Vec<Resource> {
    let target = target.trim();
    if target.is_empty() {
        ctx.toasts
            .error("Error", "Please enter a computer name or IP address");
        return Vec::new();
    }
    if validation::validate_host(target).is_err() {
        ctx.toasts.error("Error", "Invalid RDP target");
        return Vec::new();
    }

    match ctx.client.launch_rdp(target) {
        Ok(()) => {
            ctx.toasts
                .success("RDP", &format!("Launching Remote Desktop to {target}"));
            ctx.log.action(&format!("RDP connection to {target}"));
            let _ = ctx.store.add_audit_entry("RDP Connection", target, "success");
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to launch RDP");
            ctx.log.warn(&format!("RDP launch to {target} failed: {err}"));
        }
    }
    Vec::new()
}

pub fn clear_browser_cache(ctx: &mut ActionCtx) -> Vec<Resource> {
    ctx.toasts.info("Cleaning...", "Clearing browser cache");
    match ctx.client.clear_browser_cache() {
        Ok(result) => {
            let browsers = if result.browsers_cleaned.is_empty() {
                "No browsers".to_string()
            } else {
                result.browsers_cleaned.join(", ")
            };
            ctx.toasts
                .success("Success!", &format!("Cleared cache for: {browsers}"));
            let _ = ctx
                .store
                .add_audit_entry("Browser Cache Clear", &browsers, "success");
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to clear browser cache");
            ctx.log.warn(&format!("browser cache clear failed: {err}"));
        }
    }
    Vec::new()
}

pub fn network_reset(ctx: &mut ActionCtx) -> Vec<Resource> {
    ctx.toasts.info("Resetting...", "Resetting network configuration");
    match ctx.client.network_reset() {
        Ok(()) => {
            ctx.toasts
                .success("Network Reset", "Network configuration has been reset");
            let _ = ctx
                .store
                .add_audit_entry("Network Reset", "localhost", "success");
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to reset network");
            ctx.log.warn(&format!("network reset failed: {err}"));
        }
    }
    Vec::new()
}

pub fn flush_dns(ctx: &mut ActionCtx) -> Vec<Resource> {
    ctx.toasts.info("Flushing...", "Clearing DNS resolver cache");
    match ctx.client.flush_dns() {
        Ok(()) => {
            ctx.toasts
                .success("DNS Flushed", "DNS resolver cache has been cleared");
            let _ = ctx.store.add_audit_entry("DNS Flush", "localhost", "success");
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to flush DNS cache");
            ctx.log.warn(&format!("DNS flush failed: {err}"));
        }
    }
    Vec::new()
}

// ---------- reports ----------

/// Writes the last generated report as plain text next to the current
/// working directory, mirroring the web client's export button.
pub fn export_report(ctx: &mut ActionCtx) {
    let Some(report) = ctx.state.report.clone() else {
        ctx.toasts.error("Error", "Generate a report first");
        return;
    };

    let mut text = String::new();
    text.push_str("================ DESKWATCH REPORT ================\n");
    text.push_str(&format!("Generated: {}\n", report.generated));
    text.push_str(&format!("Device:    {}\n", report.device_name));
    text.push_str(&format!("Type:      {}\n\n", report.kind.to_uppercase()));
    text.push_str("System\n");
    text.push_str(&format!("  OS:               {}\n", report.sections.system.os));
    text.push_str(&format!("  CPU usage:        {}\n", report.sections.system.cpu_usage));
    text.push_str(&format!("  Memory usage:     {}\n", report.sections.system.memory_usage));
    text.push_str(&format!(
        "  Memory available: {}\n\n",
        report.sections.system.memory_available
    ));
    text.push_str("Disks\n");
    for disk in &report.sections.disks {
        text.push_str(&format!(
            "  {}: {} used, {} free\n",
            disk.drive, disk.usage, disk.free
        ));
    }
    text.push_str("\nNetwork\n");
    text.push_str(&format!("  Local IP: {}\n", report.sections.network.local_ip));
    text.push_str(&format!("  Hostname: {}\n", report.sections.network.hostname));
    text.push_str("================== End of Report =================\n");

    let filename = format!(
        "deskwatch_report_{}.txt",
        chrono::Local::now().format("%Y-%m-%d")
    );
    match std::fs::write(&filename, text) {
        Ok(()) => {
            ctx.toasts
                .success("Report Exported", &format!("Saved to {filename}"));
            ctx.log.action(&format!("report exported to {filename}"));
        }
        Err(err) => {
            ctx.toasts.error("Error", "Failed to export report");
            ctx.log.warn(&format!("report export failed: {err}"));
        }
    }
}
