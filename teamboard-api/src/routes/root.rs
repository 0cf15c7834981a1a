/// Service information endpoint
///
/// ```text
/// GET /
/// ```
///
/// ```json
/// {
///   "name": "teamboard-api",
///   "version": "0.1.0",
///   "message": "Project Management API is running",
///   "resources": ["/projects", "/tasks", "/users"]
/// }
/// ```

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub message: String,
    pub resources: Vec<String>,
}

/// Liveness answer that never touches the database
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Project Management API is running".to_string(),
        resources: ["/projects", "/tasks", "/users"]
            .iter()
            .map(|r| r.to_string())
            .collect(),
    })
}
