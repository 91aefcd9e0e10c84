use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{AlternativeRow, NewAlternative};
use crate::response::ApiResponse;
use crate::validation::parse_entity_id;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alternatives).post(create_alternative))
        .route("/:id", get(get_alternative).delete(delete_alternative))
}

#[derive(Debug, Deserialize)]
pub struct AlternativeRequest {
    pub name: Option<String>,
}

async fn list_alternatives(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AlternativeRow>>>> {
    let alternatives = state.smart.list_alternatives().await?;
    Ok(Json(ApiResponse::list(alternatives)))
}

async fn get_alternative(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AlternativeRow>>> {
    let alternative_id = parse_entity_id(&id, "alternative")?;

    let alternative = state
        .smart
        .get_alternative(alternative_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Alternative not found.".to_string()))?;

    Ok(Json(ApiResponse::ok(alternative)))
}

async fn create_alternative(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<AlternativeRequest>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<AlternativeRow>>)> {
    let name = payload
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Name is required.".to_string()))?;
    let new_alternative = NewAlternative { name };
    new_alternative.validate()?;

    let alternative = state.smart.create_alternative(&new_alternative).await?;
    tracing::info!(alternative_id = %alternative.id, "Alternative added");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(alternative).with_message("Alternative added successfully.")),
    ))
}

async fn delete_alternative(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    let alternative_id = parse_entity_id(&id, "alternative")?;

    let affected = state.smart.delete_alternative(alternative_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Alternative not found.".to_string()));
    }

    Ok(Json(ApiResponse::message("Alternative deleted successfully.")))
}
