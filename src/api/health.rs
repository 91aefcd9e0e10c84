use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub timestamp: String,
    /// Seconds since the state was built
    pub uptime: f64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(
        ApiResponse::ok(HealthStatus {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime: state.started_at.elapsed().as_secs_f64(),
        })
        .with_message("Server is running"),
    )
}
