use crate::cli::Args;
use serde::{Deserialize, Serialize};

fn default_server() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_ping_target() -> String {
    "8.8.8.8".to_string()
}

fn default_dns_domain() -> String {
    "google.com".to_string()
}

fn default_port_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    443
}

/// What a loader does with previously rendered data when its fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep the stale cache and surface a warning badge.
    #[default]
    Keep,
    /// Drop the cache and render the panel's explicit error state.
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "Server", default = "default_server")]
    pub server: String,

    #[serde(rename = "RefreshInterval", default = "default_refresh_interval")]
    pub refresh_interval: u64,

    #[serde(rename = "FailurePolicy", default)]
    pub failure_policy: FailurePolicy,

    #[serde(rename = "PingTarget", default = "default_ping_target")]
    pub ping_target: String,

    #[serde(rename = "DNSDomain", default = "default_dns_domain")]
    pub dns_domain: String,

    #[serde(rename = "PortCheckHost", default = "default_port_host")]
    pub port_check_host: String,

    #[serde(rename = "PortCheckPort", default = "default_port")]
    pub port_check_port: u16,
}

fn default_refresh_interval() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            refresh_interval: 30,
            failure_policy: FailurePolicy::Keep,
            ping_target: default_ping_target(),
            dns_domain: default_dns_domain(),
            port_check_host: default_port_host(),
            port_check_port: default_port(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".deskwatch");
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path)?;
                return Ok(toml::from_str(&content)?);
            }
        }

        Ok(Self::default())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".deskwatch");
            let content = toml::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        self.server = args.server.trim_end_matches('/').to_string();
        self.refresh_interval = args.refresh_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.failure_policy, FailurePolicy::Keep);
        assert_eq!(config.ping_target, "8.8.8.8");
    }

    #[test]
    fn apply_args_strips_trailing_slash() {
        let mut config = Config::default();
        let args = Args {
            server: "http://helpdesk.local:5000/".to_string(),
            refresh_interval: 60,
            ..Default::default()
        };
        config.apply_args(&args);
        assert_eq!(config.server, "http://helpdesk.local:5000");
        assert_eq!(config.refresh_interval, 60);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str("Server = \"http://10.0.0.2:8080\"").unwrap();
        assert_eq!(config.server, "http://10.0.0.2:8080");
        assert_eq!(config.refresh_interval, 30);
        assert_eq!(config.failure_policy, FailurePolicy::Keep);
    }

    #[test]
    fn failure_policy_round_trips() {
        let config: Config = toml::from_str("FailurePolicy = \"clear\"").unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Clear);
        let out = toml::to_string(&config).unwrap();
        assert!(out.contains("clear"));
    }
}
