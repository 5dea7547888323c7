//! Input validation for values typed into the console.
//!
//! Everything a user can type ends up in a query string, a request path or
//! a file name, so each field is checked synchronously before a request is
//! issued. Invalid input surfaces as a toast; the request is never sent.

use crate::error::{ConsoleError, Result};
use std::path::Path;

/// Maximum allowed length for hostnames and IP targets
const MAX_HOST_LEN: usize = 253;

/// Maximum allowed length for AD usernames
const MAX_USERNAME_LEN: usize = 64;

/// Maximum allowed length for free-form search queries
const MAX_QUERY_LEN: usize = 128;

/// Maximum allowed length for file paths
const MAX_PATH_LEN: usize = 4096;

/// Minimum characters before an AD or knowledge-base search is issued
pub const MIN_SEARCH_LEN: usize = 2;

/// Validates ping/traceroute/port-check targets (hostname or IP literal).
///
/// # Examples
/// ```
/// use deskwatch::validation::validate_host;
///
/// assert!(validate_host("8.8.8.8").is_ok());
/// assert!(validate_host("fileserver-01.corp.local").is_ok());
/// assert!(validate_host("host;rm -rf /").is_err());
/// assert!(validate_host("").is_err());
/// ```
pub fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(ConsoleError::Parse("Target cannot be empty".to_string()));
    }

    if host.len() > MAX_HOST_LEN {
        return Err(ConsoleError::Parse(format!(
            "Target too long (max {MAX_HOST_LEN} characters)"
        )));
    }

    if host.contains('\0') || host.chars().any(char::is_control) {
        return Err(ConsoleError::Parse(
            "Control characters not allowed in target".to_string(),
        ));
    }

    // Hostname labels, IPv4 literals and bracketless IPv6 only
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ':'))
    {
        return Err(ConsoleError::Parse(
            "Invalid characters in target".to_string(),
        ));
    }

    Ok(())
}

/// Validates a TCP port typed into the port-check form.
pub fn validate_port(port: &str) -> Result<u16> {
    let parsed: u32 = port
        .parse()
        .map_err(|_| ConsoleError::Parse(format!("Invalid port number '{port}'")))?;

    if parsed == 0 || parsed > 65535 {
        return Err(ConsoleError::Parse(
            "Port must be between 1 and 65535".to_string(),
        ));
    }

    // Range checked above
    #[allow(clippy::cast_possible_truncation)]
    Ok(parsed as u16)
}

/// Validates an AD username before it is embedded in a request path.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ConsoleError::Parse("Username cannot be empty".to_string()));
    }

    if name.len() > MAX_USERNAME_LEN {
        return Err(ConsoleError::Parse(format!(
            "Username too long (max {MAX_USERNAME_LEN} characters)"
        )));
    }

    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ConsoleError::Parse(
            "Invalid characters in username".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(ConsoleError::Parse(
            "Invalid characters in username".to_string(),
        ));
    }

    Ok(())
}

/// Validates a free-form search query (software filter, KB search, AD search).
pub fn validate_query(query: &str) -> Result<()> {
    if query.len() > MAX_QUERY_LEN {
        return Err(ConsoleError::Parse(format!(
            "Search query too long (max {MAX_QUERY_LEN} characters)"
        )));
    }

    if query.contains('\0') || query.chars().any(char::is_control) {
        return Err(ConsoleError::Parse(
            "Control characters not allowed in search query".to_string(),
        ));
    }

    Ok(())
}

/// Validates a section id supplied via `--section`.
pub fn validate_section_id(id: &str) -> Result<()> {
    if id.is_empty() || id.len() > 32 {
        return Err(ConsoleError::Parse("Invalid section id".to_string()));
    }

    if !id.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(ConsoleError::Parse(
            "Section ids are lowercase letters only".to_string(),
        ));
    }

    Ok(())
}

/// Validates the session log path to prevent traversal outside sane locations.
pub fn validate_file_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConsoleError::Parse("Log path cannot be empty".to_string()));
    }

    if path.len() > MAX_PATH_LEN {
        return Err(ConsoleError::Parse(format!(
            "Log path too long (max {MAX_PATH_LEN} characters)"
        )));
    }

    if path.contains('\0') {
        return Err(ConsoleError::Parse(
            "Null bytes not allowed in log path".to_string(),
        ));
    }

    let p = Path::new(path);
    if p.components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(ConsoleError::Parse(
            "Parent directory components not allowed in log path".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_hosts() {
        assert!(validate_host("8.8.8.8").is_ok());
        assert!(validate_host("google.com").is_ok());
        assert!(validate_host("print-srv_3.corp.local").is_ok());
        assert!(validate_host("2606:4700:4700::1111").is_ok());
    }

    #[test]
    fn rejects_shell_metacharacters_in_host() {
        assert!(validate_host("host;ls").is_err());
        assert!(validate_host("host name").is_err());
        assert!(validate_host("host|cat").is_err());
        assert!(validate_host("host\n").is_err());
    }

    #[test]
    fn rejects_empty_and_oversized_host() {
        assert!(validate_host("").is_err());
        assert!(validate_host(&"a".repeat(300)).is_err());
    }

    #[test]
    fn port_bounds() {
        assert_eq!(validate_port("443").unwrap(), 443);
        assert_eq!(validate_port("65535").unwrap(), 65535);
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("http").is_err());
    }

    #[test]
    fn username_traversal_blocked() {
        assert!(validate_username("jdoe").is_ok());
        assert!(validate_username("j.doe-admin_2").is_ok());
        assert!(validate_username("../admin").is_err());
        assert!(validate_username("a\\b").is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn query_limits() {
        assert!(validate_query("printer").is_ok());
        assert!(validate_query("").is_ok());
        assert!(validate_query(&"q".repeat(200)).is_err());
        assert!(validate_query("a\0b").is_err());
    }

    #[test]
    fn section_ids() {
        assert!(validate_section_id("tickets").is_ok());
        assert!(validate_section_id("adusers").is_ok());
        assert!(validate_section_id("Tickets").is_err());
        assert!(validate_section_id("").is_err());
    }

    #[test]
    fn log_path_traversal_blocked() {
        assert!(validate_file_path("session.log").is_ok());
        assert!(validate_file_path("/tmp/deskwatch.log").is_ok());
        assert!(validate_file_path("../../etc/passwd").is_err());
        assert!(validate_file_path("a\0b").is_err());
    }
}
