pub mod manager;

pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};

/// Application configuration, loaded from a single TOML file. Every field
/// has a default so a missing file means "stock Nagios paths".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Master configuration entrypoint handed to the validator
    #[serde(default = "default_nagios_cfg")]
    pub nagios_cfg: String,
    /// Inventory directory holding the per-host definition files
    #[serde(default = "default_hosts_dir")]
    pub hosts_dir: String,
    /// Runtime status snapshot produced by the daemon
    #[serde(default = "default_status_file")]
    pub status_file: String,
    /// Validator binary
    #[serde(default = "default_nagios_bin")]
    pub nagios_bin: String,
    /// Prefix validator/reload invocations with sudo
    #[serde(default = "default_use_sudo")]
    pub use_sudo: bool,
    /// systemd unit reloaded after a successful validation
    #[serde(default = "default_reload_service")]
    pub reload_service: String,
    #[serde(default = "default_validator_timeout")]
    pub validator_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: default_host(),
            port: default_port(),
            nagios_cfg: default_nagios_cfg(),
            hosts_dir: default_hosts_dir(),
            status_file: default_status_file(),
            nagios_bin: default_nagios_bin(),
            use_sudo: default_use_sudo(),
            reload_service: default_reload_service(),
            validator_timeout_seconds: default_validator_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8095
}

fn default_nagios_cfg() -> String {
    "/usr/local/nagios/etc/nagios.cfg".to_string()
}

fn default_hosts_dir() -> String {
    "/usr/local/nagios/etc/objects/hosts".to_string()
}

fn default_status_file() -> String {
    "/usr/local/nagios/var/status.dat".to_string()
}

fn default_nagios_bin() -> String {
    "/usr/local/nagios/bin/nagios".to_string()
}

fn default_use_sudo() -> bool {
    true
}

fn default_reload_service() -> String {
    "nagios".to_string()
}

fn default_validator_timeout() -> u64 {
    30
}
