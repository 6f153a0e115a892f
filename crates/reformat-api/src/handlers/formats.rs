//! Format listing endpoint, consumed by upload UIs to populate their
//! source/target pickers.

use axum::Json;

use reformat_convert::supported_formats;

/// GET /api/formats
pub async fn list_formats() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": supported_formats(),
    }))
}
