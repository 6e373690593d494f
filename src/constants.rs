//! Application-wide constants for templates, check commands, and markers
//!
//! Single source of truth for the strings the monitoring daemon's
//! configuration format expects.

use std::time::Duration;

/// Marker substring that the validator prints when the configuration tree
/// passes its pre-flight check. Validity is decided by this marker, not by
/// the process exit status.
pub const VALIDATION_OK_MARKER: &str = "Things look okay";

/// Object templates referenced by rendered definitions
pub mod templates {
    /// Template for hosts on the local network
    pub const HOST_INTERNAL: &str = "icmp-host-internal";

    /// Template for hosts reached across the WAN
    pub const HOST_EXTERNAL: &str = "icmp-host-external";

    /// Template for the paired ping service
    pub const PING_SERVICE: &str = "icmp-ping-service";

    /// Description written into every generated ping service
    pub const PING_SERVICE_DESCRIPTION: &str = "PING - Latency and Packet Loss";
}

/// Check commands selected by the requested check level
pub mod checks {
    pub const QUICK: &str = "check_ping_quick";
    pub const DETAILED: &str = "check_ping_detailed";
    pub const STRICT: &str = "check_ping_strict";

    /// Literal command with explicit warning/critical thresholds
    pub const CUSTOM: &str = "check_host_ping!100.0,20%!500.0,60%!10";
}

/// Status snapshot defaults
pub mod status {
    /// Check interval assumed when the snapshot omits it (minutes)
    pub const DEFAULT_CHECK_INTERVAL: f64 = 5.0;
}

/// External process constants
pub mod process {
    use super::Duration;

    /// Default bound on validator and reload subprocess runtime
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
}
