//! Plain-text fallback modes: `--snapshot` and `--check`.
//!
//! Used where the TUI cannot initialize (no tty, CI) and for quick
//! scripted probes. Each resource degrades independently; a failed
//! fetch prints a warning line instead of aborting the snapshot.

use crate::client::ApiClient;
use anyhow::Result;

/// Probes the backend once. Returns an error (exit code 1) when the
/// health endpoint is unreachable or rejects the request.
pub fn run_check(client: &ApiClient) -> Result<()> {
    match client.system_health() {
        Ok(health) => {
            println!(
                "ok: {} ({} {})",
                client.base_url(),
                health.os.system,
                health.os.release
            );
            Ok(())
        }
        Err(e) => anyhow::bail!("backend unreachable at {}: {e}", client.base_url()),
    }
}

/// Prints a one-shot text dashboard: health, security, network, tickets.
pub fn print_snapshot(client: &ApiClient) -> Result<()> {
    println!("{}", "=".repeat(64));
    println!("DESKWATCH SNAPSHOT - {}", client.base_url());
    println!("{}", "=".repeat(64));

    match client.system_health() {
        Ok(health) => {
            println!("\nSYSTEM");
            println!("{}", "-".repeat(40));
            println!(
                "Host: {} | OS: {} {}",
                health.os.hostname, health.os.system, health.os.release
            );
            println!(
                "CPU: {:.1}% ({} physical / {} logical cores)",
                health.cpu.usage_percent, health.cpu.physical_cores, health.cpu.logical_cores
            );
            println!(
                "Memory: {:.1}% ({} GB used of {} GB)",
                health.memory.percent, health.memory.used_gb, health.memory.total_gb
            );
            for disk in &health.disks {
                println!(
                    "Disk {}: {:.1}% ({} GB free of {} GB)",
                    disk.device, disk.percent, disk.free_gb, disk.total_gb
                );
            }
            if let Some(battery) = &health.battery {
                println!(
                    "Battery: {:.0}%{}",
                    battery.percent,
                    if battery.power_plugged { " (plugged in)" } else { "" }
                );
            }
        }
        Err(e) => println!("\nSYSTEM: unavailable ({e})"),
    }

    match client.security_status() {
        Ok(security) => {
            println!("\nSECURITY");
            println!("{}", "-".repeat(40));
            println!("Antivirus: {}", security.defender.status);
            println!(
                "Real-time protection: {}",
                if security.defender.real_time { "Enabled" } else { "Disabled" }
            );
            println!("Firewall: {}", security.firewall.status);
            println!(
                "Score: {}/100 ({})",
                security.score(),
                security.score_label()
            );
        }
        Err(e) => println!("\nSECURITY: unavailable ({e})"),
    }

    match client.network_info() {
        Ok(network) => {
            println!("\nNETWORK");
            println!("{}", "-".repeat(40));
            println!("Local IP:  {}", network.local_ip);
            println!("Public IP: {}", network.public_ip);
            println!("Hostname:  {}", network.hostname);
        }
        Err(e) => println!("\nNETWORK: unavailable ({e})"),
    }

    match client.tickets() {
        Ok(tickets) => {
            println!("\nTICKETS ({})", tickets.len());
            println!("{}", "-".repeat(40));
            if tickets.is_empty() {
                println!("No tickets found");
            }
            for ticket in tickets.iter().take(10) {
                println!(
                    "#{:<4} [{:<11}] {:<8} {} ({})",
                    ticket.id,
                    ticket.status.as_str(),
                    ticket.priority,
                    ticket.title,
                    ticket.user
                );
            }
        }
        Err(e) => println!("\nTICKETS: unavailable ({e})"),
    }

    println!("\n{}", "=".repeat(64));
    Ok(())
}
