// PostgreSQL-backed store
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{group_scores, SmartStore, StoreResult, UserStore};
use crate::models::{
    AlternativeRow, AlternativeScore, CriterionRow, NewAlternative, NewCriterion, NewScore,
    NewUser, ScoreDetail, ScoreRow, User,
};
use crate::smart::Alternative;

const SCORE_DETAIL_SELECT: &str = r#"
    SELECT
        s.id,
        s.alternative_id,
        a.name AS alternative_name,
        s.criterion_id,
        c.name AS criterion_name,
        s.score
    FROM scores s
    JOIN alternatives a ON a.id = s.alternative_id
    JOIN criteria c ON c.id = s.criterion_id
"#;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(
            "SELECT id, name, email, created_at FROM users ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        let user: Option<User> = sqlx::query_as(
            "SELECT id, name, email, created_at FROM users WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        let created: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_user(&self, id: i32, user: &NewUser) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(&user.name)
            .bind(&user.email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SmartStore for PgStore {
    async fn list_criteria(&self) -> StoreResult<Vec<CriterionRow>> {
        let criteria: Vec<CriterionRow> = sqlx::query_as(
            "SELECT id, name, weight, created_at FROM criteria ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(criteria)
    }

    async fn get_criterion(&self, id: Uuid) -> StoreResult<Option<CriterionRow>> {
        let criterion: Option<CriterionRow> =
            sqlx::query_as("SELECT id, name, weight, created_at FROM criteria WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(criterion)
    }

    async fn create_criterion(&self, criterion: &NewCriterion) -> StoreResult<CriterionRow> {
        let created: CriterionRow = sqlx::query_as(
            r#"
            INSERT INTO criteria (id, name, weight)
            VALUES ($1, $2, $3)
            RETURNING id, name, weight, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&criterion.name)
        .bind(criterion.weight)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_criterion(&self, id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM criteria WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_alternatives(&self) -> StoreResult<Vec<AlternativeRow>> {
        let alternatives: Vec<AlternativeRow> = sqlx::query_as(
            "SELECT id, name, created_at FROM alternatives ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(alternatives)
    }

    async fn get_alternative(&self, id: Uuid) -> StoreResult<Option<AlternativeRow>> {
        let alternative: Option<AlternativeRow> =
            sqlx::query_as("SELECT id, name, created_at FROM alternatives WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(alternative)
    }

    async fn create_alternative(
        &self,
        alternative: &NewAlternative,
    ) -> StoreResult<AlternativeRow> {
        let created: AlternativeRow = sqlx::query_as(
            r#"
            INSERT INTO alternatives (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&alternative.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_alternative(&self, id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM alternatives WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_scores(&self) -> StoreResult<Vec<ScoreDetail>> {
        let query = format!("{SCORE_DETAIL_SELECT} ORDER BY s.created_at, s.id");
        let scores: Vec<ScoreDetail> = sqlx::query_as(&query).fetch_all(&self.pool).await?;

        Ok(scores)
    }

    async fn get_score(&self, id: Uuid) -> StoreResult<Option<ScoreDetail>> {
        let query = format!("{SCORE_DETAIL_SELECT} WHERE s.id = $1");
        let score: Option<ScoreDetail> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(score)
    }

    async fn create_score(&self, score: &NewScore) -> StoreResult<ScoreRow> {
        let created: ScoreRow = sqlx::query_as(
            r#"
            INSERT INTO scores (id, alternative_id, criterion_id, score)
            VALUES ($1, $2, $3, $4)
            RETURNING id, alternative_id, criterion_id, score, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(score.alternative_id)
        .bind(score.criterion_id)
        .bind(score.score)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_score(&self, id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM scores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn fetch_alternatives_with_scores(&self) -> StoreResult<Vec<Alternative>> {
        let alternatives = self.list_alternatives().await?;

        let scores: Vec<AlternativeScore> = sqlx::query_as(
            r#"
            SELECT s.alternative_id, c.name AS criterion_name, s.score
            FROM scores s
            JOIN criteria c ON c.id = s.criterion_id
            ORDER BY s.created_at, s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(group_scores(alternatives, scores))
    }
}
