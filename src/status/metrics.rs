//! Extraction of ping metrics from free-form plugin output
//!
//! Each metric has two sources tried in order: the human-readable plugin
//! output first, then the structured performance data. First match wins, so
//! a plugin-output value beats a contradictory performance-data value.

use regex::Regex;
use std::sync::LazyLock;

// "PING OK - Packet loss = 0%, RTA = 1.23 ms"
static RTA_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RTA\s*=\s*([\d.]+)\s*ms").expect("rta output pattern"));
static LOSS_OUTPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Packet loss\s*=\s*([\d.]+)%").expect("loss output pattern"));

// "rta=1.234ms;100.000;500.000;0; pl=0%;20;60;;"
static RTA_PERF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rta=([\d.]+)ms").expect("rta perf pattern"));
static LOSS_PERF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pl=([\d.]+)%").expect("loss perf pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PingMetrics {
    /// Round-trip time in milliseconds
    pub rta: Option<f64>,
    /// Packet loss percentage
    pub packet_loss: Option<f64>,
}

fn capture_f64(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

impl PingMetrics {
    pub fn extract(plugin_output: &str, performance_data: &str) -> Self {
        let rta = capture_f64(&RTA_OUTPUT, plugin_output)
            .or_else(|| capture_f64(&RTA_PERF, performance_data));
        let packet_loss = capture_f64(&LOSS_OUTPUT, plugin_output)
            .or_else(|| capture_f64(&LOSS_PERF, performance_data));
        PingMetrics { rta, packet_loss }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plugin_output() {
        let m = PingMetrics::extract("PING OK - Packet loss = 0%, RTA = 1.23 ms", "");
        assert_eq!(m.rta, Some(1.23));
        assert_eq!(m.packet_loss, Some(0.0));
    }

    #[test]
    fn falls_back_to_performance_data() {
        let m = PingMetrics::extract("PING OK", "rta=4.567ms;100.000;500.000;0; pl=20%;20;60;;");
        assert_eq!(m.rta, Some(4.567));
        assert_eq!(m.packet_loss, Some(20.0));
    }

    #[test]
    fn plugin_output_wins_over_contradicting_perf_data() {
        let m = PingMetrics::extract(
            "PING WARNING - Packet loss = 10%, RTA = 99.0 ms",
            "rta=1.0ms;;;; pl=0%;;;;",
        );
        assert_eq!(m.rta, Some(99.0));
        assert_eq!(m.packet_loss, Some(10.0));
    }

    #[test]
    fn extraction_is_idempotent() {
        let output = "PING OK - Packet loss = 0%, RTA = 1.23 ms";
        let first = PingMetrics::extract(output, "");
        let second = PingMetrics::extract(output, "");
        assert_eq!(first, second);
    }

    #[test]
    fn absent_metrics_stay_absent() {
        let m = PingMetrics::extract("CRITICAL - Host Unreachable", "");
        assert_eq!(m.rta, None);
        assert_eq!(m.packet_loss, None);
    }

    #[test]
    fn rta_is_case_sensitive_in_plugin_output() {
        // Lowercase "rta =" belongs to performance data, not plugin output
        let m = PingMetrics::extract("ping ok - rta = 5.0 ms", "");
        assert_eq!(m.rta, None);
    }
}
