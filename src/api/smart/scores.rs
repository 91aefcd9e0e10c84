use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{NewScore, ScoreDetail, ScoreRow};
use crate::response::ApiResponse;
use crate::store::StoreError;
use crate::validation::parse_entity_id;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scores).post(create_score))
        .route("/:id", get(get_score).delete(delete_score))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub alternative_id: Option<String>,
    pub criterion_id: Option<String>,
    pub score: Option<f64>,
}

impl ScoreRequest {
    fn into_new_score(self) -> Result<NewScore> {
        let (alternative_id, criterion_id, score) =
            match (self.alternative_id, self.criterion_id, self.score) {
                (Some(a), Some(c), Some(s)) => (a, c, s),
                _ => {
                    return Err(AppError::BadRequest(
                        "Alternative ID, Criterion ID, and score are required.".to_string(),
                    ))
                }
            };

        Ok(NewScore {
            alternative_id: parse_entity_id(&alternative_id, "alternative")?,
            criterion_id: parse_entity_id(&criterion_id, "criterion")?,
            score,
        })
    }
}

async fn list_scores(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ScoreDetail>>>> {
    let scores = state.smart.list_scores().await?;
    Ok(Json(ApiResponse::list(scores)))
}

async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScoreDetail>>> {
    let score_id = parse_entity_id(&id, "score")?;

    let score = state
        .smart
        .get_score(score_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Score not found.".to_string()))?;

    Ok(Json(ApiResponse::ok(score)))
}

async fn create_score(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ScoreRequest>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<ScoreRow>>)> {
    let new_score = payload.into_new_score()?;

    let score = state
        .smart
        .create_score(&new_score)
        .await
        .map_err(|err| match err {
            StoreError::MissingReference(_) => AppError::BadRequest(
                "Alternative or criterion does not exist.".to_string(),
            ),
            other => other.into(),
        })?;
    tracing::info!(score_id = %score.id, "Score added");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(score).with_message("Score added successfully.")),
    ))
}

async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    let score_id = parse_entity_id(&id, "score")?;

    let affected = state.smart.delete_score(score_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Score not found.".to_string()));
    }

    Ok(Json(ApiResponse::message("Score deleted successfully.")))
}
