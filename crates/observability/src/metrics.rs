//! Tee metrics recording
//!
//! Thin helpers over the `metrics` facade. Without an installed recorder every
//! call is a no-op.

use metrics::{counter, histogram};

/// Record one sink dump
pub fn record_dump(sink_type: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "tee_sink_dumps_total",
        "sink_type" => sink_type.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long a dump took
pub fn record_dump_duration_ms(sink_type: &str, duration_ms: f64) {
    histogram!(
        "tee_sink_dump_duration_ms",
        "sink_type" => sink_type.to_string()
    )
    .record(duration_ms);
}

/// Record a listener failure swallowed during change notification
pub fn record_listener_failure(sink_type: &str) {
    counter!(
        "tee_listener_failures_total",
        "sink_type" => sink_type.to_string()
    )
    .increment(1);
}

/// Record a host operation handed to the wrapped component
pub fn record_delegation(host_kind: &str) {
    counter!(
        "tee_host_delegations_total",
        "host_kind" => host_kind.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_dump("Null", true);
        record_dump("Disk", false);
        record_dump_duration_ms("Disk", 1.5);
        record_listener_failure("Memory");
        record_delegation("trainable");
    }
}
