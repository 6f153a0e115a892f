//! Health check endpoint.

use axum::Json;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Server is running",
    }))
}
