//! Status snapshot data model
//!
//! Everything here is ephemeral: rebuilt from the snapshot on every read,
//! never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Host state derived from the snapshot's numeric state code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HostState {
    Up,
    Down,
    Unreachable,
    Pending,
}

impl HostState {
    /// `{0:UP, 1:DOWN, 2:UNREACHABLE}`; any other code means the host has
    /// not been checked yet.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => HostState::Up,
            1 => HostState::Down,
            2 => HostState::Unreachable,
            _ => HostState::Pending,
        }
    }
}

/// Ping-service state from a matching `servicestatus` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PingState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl PingState {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => PingState::Ok,
            1 => PingState::Warning,
            2 => PingState::Critical,
            _ => PingState::Unknown,
        }
    }
}

/// One host's last-known state, enriched with ping metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub host_name: String,
    pub state: HostState,
    pub state_code: i32,
    pub plugin_output: String,
    pub last_check: i64,
    pub last_state_change: i64,
    pub check_interval: f64,
    pub rta: Option<f64>,
    pub packet_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_state: Option<PingState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_output: Option<String>,
}

/// Count of hosts per mapped state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub up: u32,
    pub down: u32,
    pub unreachable: u32,
    pub pending: u32,
}

impl StateSummary {
    pub fn record(&mut self, state: HostState) {
        match state {
            HostState::Up => self.up += 1,
            HostState::Down => self.down += 1,
            HostState::Unreachable => self.unreachable += 1,
            HostState::Pending => self.pending += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.up + self.down + self.unreachable + self.pending
    }
}

/// Full result of one snapshot read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub statuses: BTreeMap<String, StatusRecord>,
    pub summary: StateSummary,
    pub total: u32,
    pub timestamp: i64,
    /// Set when the snapshot file is absent; the report is empty but the
    /// condition is not treated as fatal.
    pub snapshot_missing: bool,
}

impl StatusReport {
    pub fn missing() -> Self {
        StatusReport {
            statuses: BTreeMap::new(),
            summary: StateSummary::default(),
            total: 0,
            timestamp: chrono::Utc::now().timestamp(),
            snapshot_missing: true,
        }
    }
}
