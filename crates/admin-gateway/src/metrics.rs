//! Gateway counters
//!
//! - `gateway_requests_total` (counter): label `status`
//! - `gateway_refresh_total` (counter): label `outcome`
//! - `gateway_replays_total` (counter)
//!
//! Calls are no-ops until the binary installs a recorder.

/// Record one backend response by status code.
pub fn record_request(status: u16) {
    metrics::counter!("gateway_requests_total", "status" => status.to_string()).increment(1);
}

/// Record a finished refresh attempt (`success`, `skipped` or `failure`).
pub fn record_refresh(outcome: &'static str) {
    metrics::counter!("gateway_refresh_total", "outcome" => outcome).increment(1);
}

/// Record a request replayed after a refresh.
pub fn record_replay() {
    metrics::counter!("gateway_replays_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_functions_do_not_panic_without_recorder() {
        record_request(401);
        record_refresh("success");
        record_replay();
    }
}
