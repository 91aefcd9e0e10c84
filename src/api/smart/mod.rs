mod alternatives;
mod criteria;
mod scores;

use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::response::ApiResponse;
use crate::smart::{rank, RankedResult};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(calculate_ranking))
        .nest("/criteria", criteria::routes())
        .nest("/alternatives", alternatives::routes())
        .nest("/scores", scores::routes())
}

/// Rank every stored alternative against the stored criteria.
async fn calculate_ranking(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RankedResult>>>> {
    let criteria = state.smart.fetch_criteria().await?;
    let alternatives = state.smart.fetch_alternatives_with_scores().await?;

    let ranking = rank(&alternatives, &criteria);
    tracing::debug!(
        criteria = criteria.len(),
        alternatives = alternatives.len(),
        "SMART ranking computed"
    );

    Ok(Json(ApiResponse::ok(ranking)))
}
