//! Health check handler

/// Liveness probe; no database round-trip.
pub async fn health_check() -> &'static str {
    "OK"
}
