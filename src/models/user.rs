use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::validation::validate_email_shape;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Validated user payload used for both create and update.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: String,
    #[validate(
        length(max = 100, message = "Email must be at most 100 characters."),
        custom(function = "validate_email_shape")
    )]
    pub email: String,
}
