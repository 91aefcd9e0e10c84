// In-process store, same constraints as the SQL schema
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{group_scores, SmartStore, StoreError, StoreResult, UserStore};
use crate::models::{
    AlternativeRow, AlternativeScore, CriterionRow, NewAlternative, NewCriterion, NewScore,
    NewUser, ScoreDetail, ScoreRow, User,
};
use crate::smart::Alternative;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    last_user_id: i32,
    criteria: Vec<CriterionRow>,
    alternatives: Vec<AlternativeRow>,
    scores: Vec<ScoreRow>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn score_detail(&self, score: &ScoreRow) -> Option<ScoreDetail> {
        let alternative = self
            .alternatives
            .iter()
            .find(|a| a.id == score.alternative_id)?;
        let criterion = self.criteria.iter().find(|c| c.id == score.criterion_id)?;

        Some(ScoreDetail {
            id: score.id,
            alternative_id: alternative.id,
            alternative_name: alternative.name.clone(),
            criterion_id: criterion.id,
            criterion_name: criterion.name.clone(),
            score: score.score,
        })
    }
}

/// Store kept entirely in process memory.
///
/// Enforces the same rules as the SQL schema: unique emails, score foreign
/// keys, and cascading deletes from criteria and alternatives to scores.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn retain_count<T>(rows: &mut Vec<T>, keep: impl FnMut(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(keep);
    (before - rows.len()) as u64
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&user.email, None) {
            return Err(StoreError::Conflict(format!(
                "duplicate email {}",
                user.email
            )));
        }

        tables.last_user_id += 1;
        let created = User {
            id: tables.last_user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());

        Ok(created)
    }

    async fn update_user(&self, id: i32, user: &NewUser) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == id) {
            return Ok(0);
        }
        if tables.email_taken(&user.email, Some(id)) {
            return Err(StoreError::Conflict(format!(
                "duplicate email {}",
                user.email
            )));
        }

        let mut updated = 0;
        for existing in tables.users.iter_mut().filter(|u| u.id == id) {
            existing.name = user.name.clone();
            existing.email = user.email.clone();
            updated += 1;
        }

        Ok(updated)
    }

    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        Ok(retain_count(&mut tables.users, |u| u.id != id))
    }
}

#[async_trait]
impl SmartStore for MemoryStore {
    async fn list_criteria(&self) -> StoreResult<Vec<CriterionRow>> {
        Ok(self.tables.read().await.criteria.clone())
    }

    async fn get_criterion(&self, id: Uuid) -> StoreResult<Option<CriterionRow>> {
        let tables = self.tables.read().await;
        Ok(tables.criteria.iter().find(|c| c.id == id).cloned())
    }

    async fn create_criterion(&self, criterion: &NewCriterion) -> StoreResult<CriterionRow> {
        let created = CriterionRow {
            id: Uuid::new_v4(),
            name: criterion.name.clone(),
            weight: criterion.weight,
            created_at: Utc::now(),
        };
        self.tables.write().await.criteria.push(created.clone());

        Ok(created)
    }

    async fn delete_criterion(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let deleted = retain_count(&mut tables.criteria, |c| c.id != id);
        if deleted > 0 {
            tables.scores.retain(|s| s.criterion_id != id);
        }

        Ok(deleted)
    }

    async fn list_alternatives(&self) -> StoreResult<Vec<AlternativeRow>> {
        Ok(self.tables.read().await.alternatives.clone())
    }

    async fn get_alternative(&self, id: Uuid) -> StoreResult<Option<AlternativeRow>> {
        let tables = self.tables.read().await;
        Ok(tables.alternatives.iter().find(|a| a.id == id).cloned())
    }

    async fn create_alternative(
        &self,
        alternative: &NewAlternative,
    ) -> StoreResult<AlternativeRow> {
        let created = AlternativeRow {
            id: Uuid::new_v4(),
            name: alternative.name.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.alternatives.push(created.clone());

        Ok(created)
    }

    async fn delete_alternative(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let deleted = retain_count(&mut tables.alternatives, |a| a.id != id);
        if deleted > 0 {
            tables.scores.retain(|s| s.alternative_id != id);
        }

        Ok(deleted)
    }

    async fn list_scores(&self) -> StoreResult<Vec<ScoreDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .scores
            .iter()
            .filter_map(|s| tables.score_detail(s))
            .collect())
    }

    async fn get_score(&self, id: Uuid) -> StoreResult<Option<ScoreDetail>> {
        let tables = self.tables.read().await;
        Ok(tables
            .scores
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| tables.score_detail(s)))
    }

    async fn create_score(&self, score: &NewScore) -> StoreResult<ScoreRow> {
        let mut tables = self.tables.write().await;
        if !tables.alternatives.iter().any(|a| a.id == score.alternative_id) {
            return Err(StoreError::MissingReference(format!(
                "alternative {} does not exist",
                score.alternative_id
            )));
        }
        if !tables.criteria.iter().any(|c| c.id == score.criterion_id) {
            return Err(StoreError::MissingReference(format!(
                "criterion {} does not exist",
                score.criterion_id
            )));
        }

        let created = ScoreRow {
            id: Uuid::new_v4(),
            alternative_id: score.alternative_id,
            criterion_id: score.criterion_id,
            score: score.score,
            created_at: Utc::now(),
        };
        tables.scores.push(created.clone());

        Ok(created)
    }

    async fn delete_score(&self, id: Uuid) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        Ok(retain_count(&mut tables.scores, |s| s.id != id))
    }

    async fn fetch_alternatives_with_scores(&self) -> StoreResult<Vec<Alternative>> {
        let tables = self.tables.read().await;
        let cells: Vec<AlternativeScore> = tables
            .scores
            .iter()
            .filter_map(|s| {
                let criterion = tables.criteria.iter().find(|c| c.id == s.criterion_id)?;
                Some(AlternativeScore {
                    alternative_id: s.alternative_id,
                    criterion_name: criterion.name.clone(),
                    score: s.score,
                })
            })
            .collect();

        Ok(group_scores(tables.alternatives.clone(), cells))
    }
}
