//! Liveness check backed by the database

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let (status_code, status, database) = match state.db_manager.health_check().await {
        Ok(()) => (StatusCode::OK, "healthy", "healthy".to_string()),
        Err(e) => {
            warn!("Database health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", e.to_string())
        }
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "database": database,
            "app": state.app_name,
            "version": state.version,
            "timestamp": chrono::Utc::now().timestamp(),
        })),
    )
}
