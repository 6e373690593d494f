//! Wrapper around the daemon's configuration pre-flight check

use serde::Serialize;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::Config;
use crate::constants::VALIDATION_OK_MARKER;
use crate::errors::PanelError;

/// Outcome of one validator run.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub output: String,
}

/// Invokes `<nagios_bin> -v <nagios_cfg>` and scans the combined output for
/// the fixed success marker. The exit status alone is deliberately not
/// consulted; the daemon signals a clean pre-flight only through the
/// marker text.
pub struct Validator {
    nagios_bin: String,
    nagios_cfg: String,
    use_sudo: bool,
    timeout: Duration,
}

impl Validator {
    pub fn new(nagios_bin: &str, nagios_cfg: &str, use_sudo: bool, timeout: Duration) -> Self {
        Self {
            nagios_bin: nagios_bin.to_string(),
            nagios_cfg: nagios_cfg.to_string(),
            use_sudo,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.nagios_bin,
            &config.nagios_cfg,
            config.use_sudo,
            Duration::from_secs(config.validator_timeout_seconds),
        )
    }

    pub async fn run(&self) -> Result<Validation, PanelError> {
        debug!("Validating configuration via {}", self.nagios_bin);

        let mut cmd = if self.use_sudo {
            let mut cmd = Command::new("sudo");
            cmd.arg(&self.nagios_bin);
            cmd
        } else {
            Command::new(&self.nagios_bin)
        };
        cmd.arg("-v").arg(&self.nagios_cfg);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                PanelError::process(
                    "validate",
                    format!("validator timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| PanelError::process("validate", e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(stderr.trim_end());
        }

        let valid = combined.contains(VALIDATION_OK_MARKER);
        debug!(valid, "Validator finished");
        Ok(Validation {
            valid,
            output: combined,
        })
    }
}
