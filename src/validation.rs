//! Input validation helpers shared by the handlers

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::ValidationError;

use crate::error::{AppError, Result};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Hardcoded pattern, always compiles
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email regex is invalid")
});

/// Loose email shape check: something@something.something, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// validator crate compatible wrapper around [`is_valid_email`]
pub fn validate_email_shape(email: &str) -> std::result::Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Invalid email format.".into());
        Err(err)
    }
}

/// Parse a user path id. User ids are integer serials.
pub fn parse_user_id(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid user ID format.".to_string()))
}

/// Parse a criterion/alternative/score id. `kind` names the entity in the error.
pub fn parse_entity_id(raw: &str, kind: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {kind} ID format.")))
}
