//! Wrapper around the daemon's service reload

use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::info;

use crate::config::Config;
use crate::errors::PanelError;

/// Invokes `systemctl reload <service>`. Unlike the validator, success here
/// means exit status zero.
pub struct Reloader {
    service: String,
    use_sudo: bool,
    timeout: Duration,
}

impl Reloader {
    pub fn new(service: &str, use_sudo: bool, timeout: Duration) -> Self {
        Self {
            service: service.to_string(),
            use_sudo,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.reload_service,
            config.use_sudo,
            Duration::from_secs(config.validator_timeout_seconds),
        )
    }

    /// Returns the captured output on success; a non-zero exit surfaces as
    /// a process error carrying the same output.
    pub async fn run(&self) -> Result<String, PanelError> {
        info!("Reloading service: {}", self.service);

        let mut cmd = if self.use_sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg("systemctl");
            cmd
        } else {
            Command::new("systemctl")
        };
        cmd.arg("reload").arg(&self.service);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                PanelError::process(
                    "reload",
                    format!("reload timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| PanelError::process("reload", e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr).trim().to_string();

        if output.status.success() {
            info!("Service {} reloaded successfully", self.service);
            Ok(combined)
        } else {
            Err(PanelError::process(
                "reload",
                if combined.is_empty() {
                    format!("exit status {:?}", output.status.code())
                } else {
                    combined
                },
            ))
        }
    }
}
