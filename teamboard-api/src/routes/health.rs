/// Health check endpoint
///
/// Provides a simple health check endpoint that verifies:
/// - The server is running
/// - Database connectivity
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "message": "Database connection succeeded"
/// }
/// ```
///
/// A failed database probe still answers 200, with `status` set to
/// `degraded`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use teamboard_shared::db::pool::test_connection;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Outcome of the database probe
    pub message: String,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let check = test_connection(&state.db).await;

    let (status, database) = if check.ok {
        ("healthy", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        message: check.message,
    })
}
