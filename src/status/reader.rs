//! Two-pass reader for the runtime status snapshot
//!
//! Pass 1 turns `hoststatus` blocks into records and tallies the state
//! summary. Pass 2 scans `servicestatus` blocks for ping services and,
//! where one reports a round-trip time, overwrites the host-level metrics
//! with the more precise service-level ones.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::constants::status::DEFAULT_CHECK_INTERVAL;
use crate::errors::PanelError;
use crate::objects::{bare_blocks, parse_status_body};
use crate::status::metrics::PingMetrics;
use crate::status::types::{HostState, PingState, StateSummary, StatusRecord, StatusReport};

/// Read and parse the snapshot file. An absent file yields an empty report
/// flagged `snapshot_missing` rather than an error.
pub async fn read_status(path: &Path) -> Result<StatusReport, PanelError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Status snapshot {} not found", path.display());
            return Ok(StatusReport::missing());
        }
        Err(e) => return Err(PanelError::persistence(path.display(), e)),
    };
    Ok(parse_status(&content))
}

/// Parse a snapshot blob into per-host records plus a summary.
pub fn parse_status(content: &str) -> StatusReport {
    let mut report = StatusReport {
        statuses: Default::default(),
        summary: StateSummary::default(),
        total: 0,
        timestamp: chrono::Utc::now().timestamp(),
        snapshot_missing: false,
    };

    // Pass 1: one record per hoststatus block
    for body in bare_blocks(content, "hoststatus") {
        let data = parse_status_body(body);
        let host_name = data
            .get("host_name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        let state_code = parse_i32(data.get("current_state"), -1);
        let state = HostState::from_code(state_code);

        let plugin_output = data.get("plugin_output").cloned().unwrap_or_default();
        let performance_data = data.get("performance_data").cloned().unwrap_or_default();
        let metrics = PingMetrics::extract(&plugin_output, &performance_data);

        let check_interval = data
            .get("normal_check_interval")
            .or_else(|| data.get("check_interval"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHECK_INTERVAL);

        report.summary.record(state);
        report.statuses.insert(
            host_name.clone(),
            StatusRecord {
                host_name,
                state,
                state_code,
                plugin_output,
                last_check: parse_i64(data.get("last_check")),
                last_state_change: parse_i64(data.get("last_state_change")),
                check_interval,
                rta: metrics.rta,
                packet_loss: metrics.packet_loss,
                ping_state: None,
                service_output: None,
            },
        );
    }

    // Pass 2: ping-service details override host-level metrics
    for body in bare_blocks(content, "servicestatus") {
        let data = parse_status_body(body);
        let host_name = data.get("host_name").cloned().unwrap_or_default();
        let description = data.get("service_description").cloned().unwrap_or_default();

        if !description.to_ascii_lowercase().contains("ping") {
            continue;
        }
        let Some(record) = report.statuses.get_mut(&host_name) else {
            continue;
        };

        let plugin_output = data.get("plugin_output").cloned().unwrap_or_default();
        let performance_data = data.get("performance_data").cloned().unwrap_or_default();
        let metrics = PingMetrics::extract(&plugin_output, &performance_data);

        if metrics.rta.is_some() {
            record.rta = metrics.rta;
            record.packet_loss = metrics.packet_loss;
            record.service_output = Some(plugin_output);
            record.ping_state = Some(PingState::from_code(parse_i32(
                data.get("current_state"),
                0,
            )));
        }
    }

    report.total = report.summary.total();
    report
}

fn parse_i32(value: Option<&String>, default: i32) -> i32 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_i64(value: Option<&String>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}
