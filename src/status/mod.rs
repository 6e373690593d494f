//! Live health reporting from the daemon's runtime status snapshot.

pub mod metrics;
pub mod reader;
pub mod types;

pub use metrics::PingMetrics;
pub use reader::{parse_status, read_status};
pub use types::{HostState, PingState, StateSummary, StatusRecord, StatusReport};
