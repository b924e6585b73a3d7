//! Artificial network delay for the mock endpoints.

use crate::state::AppState;
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use clinic_core::config::LatencyRange;
use rand::Rng;
use std::time::Duration;

/// Pick a delay uniformly from `latency`. Zero when the range is disabled.
pub fn pick_delay(latency: LatencyRange) -> Duration {
    if latency.is_disabled() {
        return Duration::ZERO;
    }
    let millis = rand::thread_rng().gen_range(latency.min_ms()..=latency.max_ms());
    Duration::from_millis(millis)
}

/// Middleware: wait a random delay, then run the handler.
pub async fn simulate_latency(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let delay = pick_delay(state.cfg.latency());
    if !delay.is_zero() {
        tracing::trace!(
            delay_ms = delay.as_millis() as u64,
            path = %request.uri().path(),
            "simulating latency"
        );
        tokio::time::sleep(delay).await;
    }
    next.run(request).await
}
