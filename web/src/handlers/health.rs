//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::session::SessionRegistry;
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

/// Simple health check endpoint (for basic liveness).
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    /// Always `"ready"` while the process serves requests
    pub status: &'static str,
    /// Sessions currently held in memory
    pub sessions: usize,
}

/// Readiness check reporting how many sessions are held.
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
///
/// # Response
///
/// ```json
/// { "status": "ready", "sessions": 3 }
/// ```
pub async fn readiness_check<T>(State(registry): State<SessionRegistry<T>>) -> Json<Readiness>
where
    T: Send + Sync + 'static,
{
    Json(Readiness {
        status: "ready",
        sessions: registry.len().await,
    })
}
