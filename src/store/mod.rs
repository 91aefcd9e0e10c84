//! Storage seam for users and SMART rows.
//!
//! Handlers only see the [`UserStore`] and [`SmartStore`] traits; the
//! process decides at startup whether they are backed by PostgreSQL
//! ([`PgStore`]) or held in memory ([`MemoryStore`]).

mod memory;
mod postgres;

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{
    AlternativeRow, AlternativeScore, CriterionRow, NewAlternative, NewCriterion, NewScore,
    NewUser, ScoreDetail, ScoreRow, User,
};
use crate::smart::{Alternative, Criterion};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage failures, tagged by kind so callers never inspect messages.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (duplicate email)
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// A foreign key pointed at a row that does not exist
    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::MissingReference(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, newest first
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> StoreResult<Option<User>>;
    async fn create_user(&self, user: &NewUser) -> StoreResult<User>;
    /// Returns the number of rows updated
    async fn update_user(&self, id: i32, user: &NewUser) -> StoreResult<u64>;
    /// Returns the number of rows deleted
    async fn delete_user(&self, id: i32) -> StoreResult<u64>;
}

#[async_trait]
pub trait SmartStore: Send + Sync {
    async fn list_criteria(&self) -> StoreResult<Vec<CriterionRow>>;
    async fn get_criterion(&self, id: Uuid) -> StoreResult<Option<CriterionRow>>;
    async fn create_criterion(&self, criterion: &NewCriterion) -> StoreResult<CriterionRow>;
    async fn delete_criterion(&self, id: Uuid) -> StoreResult<u64>;

    async fn list_alternatives(&self) -> StoreResult<Vec<AlternativeRow>>;
    async fn get_alternative(&self, id: Uuid) -> StoreResult<Option<AlternativeRow>>;
    async fn create_alternative(&self, alternative: &NewAlternative)
        -> StoreResult<AlternativeRow>;
    async fn delete_alternative(&self, id: Uuid) -> StoreResult<u64>;

    async fn list_scores(&self) -> StoreResult<Vec<ScoreDetail>>;
    async fn get_score(&self, id: Uuid) -> StoreResult<Option<ScoreDetail>>;
    async fn create_score(&self, score: &NewScore) -> StoreResult<ScoreRow>;
    async fn delete_score(&self, id: Uuid) -> StoreResult<u64>;

    /// Ranking input: every criterion with its weight
    async fn fetch_criteria(&self) -> StoreResult<Vec<Criterion>> {
        Ok(self
            .list_criteria()
            .await?
            .into_iter()
            .map(Criterion::from)
            .collect())
    }

    /// Ranking input: every alternative with its scores keyed by criterion name
    async fn fetch_alternatives_with_scores(&self) -> StoreResult<Vec<Alternative>>;
}

/// Group score cells under their alternatives, keeping alternative order.
///
/// Alternatives without scores get an empty mapping. If an alternative has
/// several scores for the same criterion name, the last one wins.
pub(crate) fn group_scores(
    alternatives: Vec<AlternativeRow>,
    scores: Vec<AlternativeScore>,
) -> Vec<Alternative> {
    let mut by_alternative: HashMap<Uuid, HashMap<String, f64>> = HashMap::new();
    for cell in scores {
        by_alternative
            .entry(cell.alternative_id)
            .or_default()
            .insert(cell.criterion_name, cell.score);
    }

    alternatives
        .into_iter()
        .map(|row| Alternative {
            scores: by_alternative.remove(&row.id).unwrap_or_default(),
            name: row.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn alternative_row(name: &str) -> AlternativeRow {
        AlternativeRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_scores_keeps_alternative_order() {
        let a = alternative_row("A");
        let b = alternative_row("B");
        let c = alternative_row("C");
        let scores = vec![
            AlternativeScore {
                alternative_id: c.id,
                criterion_name: "Cost".to_string(),
                score: 3.0,
            },
            AlternativeScore {
                alternative_id: a.id,
                criterion_name: "Cost".to_string(),
                score: 1.0,
            },
            AlternativeScore {
                alternative_id: a.id,
                criterion_name: "Quality".to_string(),
                score: 2.0,
            },
        ];

        let grouped = group_scores(vec![a, b, c], scores);

        let names: Vec<&str> = grouped.iter().map(|alt| alt.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(grouped[0].scores.len(), 2);
        assert_eq!(grouped[0].scores["Quality"], 2.0);
        assert!(grouped[1].scores.is_empty());
        assert_eq!(grouped[2].scores["Cost"], 3.0);
    }

    #[test]
    fn test_group_scores_drops_orphan_cells() {
        let a = alternative_row("A");
        let scores = vec![AlternativeScore {
            alternative_id: Uuid::new_v4(),
            criterion_name: "Cost".to_string(),
            score: 9.0,
        }];

        let grouped = group_scores(vec![a], scores);

        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].scores.is_empty());
    }

    #[test]
    fn test_non_database_sqlx_error_is_opaque() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
    }
}
