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
use crate::models::{CriterionRow, NewCriterion};
use crate::response::ApiResponse;
use crate::validation::parse_entity_id;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_criteria).post(create_criterion))
        .route("/:id", get(get_criterion).delete(delete_criterion))
}

#[derive(Debug, Deserialize)]
pub struct CriterionRequest {
    pub name: Option<String>,
    pub weight: Option<f64>,
}

impl CriterionRequest {
    fn into_new_criterion(self) -> Result<NewCriterion> {
        let (name, weight) = match (self.name, self.weight) {
            (Some(name), Some(weight)) if !name.is_empty() => (name, weight),
            _ => {
                return Err(AppError::BadRequest(
                    "Name and weight are required.".to_string(),
                ))
            }
        };

        let criterion = NewCriterion { name, weight };
        criterion.validate()?;
        Ok(criterion)
    }
}

async fn list_criteria(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CriterionRow>>>> {
    let criteria = state.smart.list_criteria().await?;
    Ok(Json(ApiResponse::list(criteria)))
}

async fn get_criterion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CriterionRow>>> {
    let criterion_id = parse_entity_id(&id, "criterion")?;

    let criterion = state
        .smart
        .get_criterion(criterion_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Criterion not found.".to_string()))?;

    Ok(Json(ApiResponse::ok(criterion)))
}

async fn create_criterion(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CriterionRequest>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<CriterionRow>>)> {
    let new_criterion = payload.into_new_criterion()?;

    let criterion = state.smart.create_criterion(&new_criterion).await?;
    tracing::info!(criterion_id = %criterion.id, "Criterion added");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(criterion).with_message("Criterion added successfully.")),
    ))
}

async fn delete_criterion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    let criterion_id = parse_entity_id(&id, "criterion")?;

    let affected = state.smart.delete_criterion(criterion_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Criterion not found.".to_string()));
    }

    Ok(Json(ApiResponse::message("Criterion deleted successfully.")))
}
