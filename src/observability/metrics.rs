//! Metrics collection.
//!
//! # Metrics
//! - `relay_logins_total` (counter): login attempts by chain, outcome
//! - `relay_binds_total` (counter): bind submissions by chain, outcome
//! - `relay_transactions_total` (counter): pushes by chain, outcome
//! - `relay_http_request_duration_seconds` (histogram): backend latency by method
//!
//! The library only records; installing an exporter is left to the host.

use std::time::Duration;

use crate::strategy::ChainId;

fn outcome(ok: bool) -> &'static str {
    if ok {
        "success"
    } else {
        "error"
    }
}

/// Record the result of a login flow.
pub fn record_login(chain: ChainId, ok: bool) {
    metrics::counter!("relay_logins_total", "chain" => chain.as_str(), "outcome" => outcome(ok))
        .increment(1);
}

/// Record the acknowledgment of a bind submission.
pub fn record_bind(chain: ChainId, ok: bool) {
    metrics::counter!("relay_binds_total", "chain" => chain.as_str(), "outcome" => outcome(ok))
        .increment(1);
}

/// Record the result of a transaction flow.
pub fn record_transaction(chain: ChainId, ok: bool) {
    metrics::counter!(
        "relay_transactions_total",
        "chain" => chain.as_str(),
        "outcome" => outcome(ok)
    )
    .increment(1);
}

/// Record the latency of one backend HTTP request.
pub fn record_http_request(method: &str, elapsed: Duration) {
    metrics::histogram!("relay_http_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}
