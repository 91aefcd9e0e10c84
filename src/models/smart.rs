// Persisted rows backing the SMART ranking
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::smart::Criterion;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CriterionRow {
    pub id: Uuid,
    pub name: String,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

impl From<CriterionRow> for Criterion {
    fn from(row: CriterionRow) -> Self {
        Criterion {
            name: row.name,
            weight: row.weight,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AlternativeRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreRow {
    pub id: Uuid,
    pub alternative_id: Uuid,
    pub criterion_id: Uuid,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Score joined with the names of the alternative and criterion it links.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreDetail {
    pub id: Uuid,
    pub alternative_id: Uuid,
    pub alternative_name: String,
    pub criterion_id: Uuid,
    pub criterion_name: String,
    pub score: f64,
}

/// One score cell of the ranking input: which alternative, against which criterion.
#[derive(Debug, Clone, FromRow)]
pub struct AlternativeScore {
    pub alternative_id: Uuid,
    pub criterion_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Validate)]
pub struct NewCriterion {
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Weight must be a non-negative number."))]
    pub weight: f64,
}

#[derive(Debug, Clone, Validate)]
pub struct NewAlternative {
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewScore {
    pub alternative_id: Uuid,
    pub criterion_id: Uuid,
    pub score: f64,
}
