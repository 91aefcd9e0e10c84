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
use crate::models::{NewUser, User};
use crate::response::ApiResponse;
use crate::store::StoreError;
use crate::validation::parse_user_id;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserRequest {
    fn into_new_user(self) -> Result<NewUser> {
        let (name, email) = match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => (name, email),
            _ => {
                return Err(AppError::BadRequest(
                    "Name and email are required.".to_string(),
                ))
            }
        };

        let user = NewUser { name, email };
        user.validate()?;
        Ok(user)
    }
}

fn email_conflict(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict(_) => AppError::Conflict("Email already exists.".to_string()),
        other => other.into(),
    }
}

async fn list_users(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = state.users.list_users().await?;
    Ok(Json(ApiResponse::list(users)))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user_id = parse_user_id(&id)?;

    let user = state
        .users
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    Ok(Json(ApiResponse::ok(user)))
}

async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<UserRequest>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<User>>)> {
    let new_user = payload.into_new_user()?;

    let user = state
        .users
        .create_user(&new_user)
        .await
        .map_err(email_conflict)?;
    tracing::info!(user_id = user.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(user).with_message("User created successfully.")),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<UserRequest>, AppError>,
) -> Result<Json<ApiResponse>> {
    let user_id = parse_user_id(&id)?;
    let update = payload.into_new_user()?;

    let affected = state
        .users
        .update_user(user_id, &update)
        .await
        .map_err(email_conflict)?;
    if affected == 0 {
        return Err(AppError::NotFound("User not found.".to_string()));
    }

    Ok(Json(ApiResponse::message("User updated successfully.")))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>> {
    let user_id = parse_user_id(&id)?;

    let affected = state.users.delete_user(user_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("User not found.".to_string()));
    }
    tracing::info!(user_id, "User deleted");

    Ok(Json(ApiResponse::message("User deleted successfully.")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>) -> UserRequest {
        UserRequest {
            name: name.map(String::from),
            email: email.map(String::from),
        }
    }

    fn bad_request_message(result: Result<NewUser>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_required_fields() {
        for req in [
            request(None, Some("a@b.co")),
            request(Some("Ana"), None),
            request(Some(""), Some("a@b.co")),
            request(Some("Ana"), Some("")),
        ] {
            assert_eq!(
                bad_request_message(req.into_new_user()),
                "Name and email are required."
            );
        }
    }

    #[test]
    fn test_email_shape() {
        let msg = bad_request_message(request(Some("Ana"), Some("ana-at-example")).into_new_user());
        assert_eq!(msg, "Invalid email format.");
    }

    #[test]
    fn test_name_length() {
        let long_name = "x".repeat(101);
        let msg = bad_request_message(request(Some(&long_name), Some("a@b.co")).into_new_user());
        assert_eq!(msg, "Name must be at most 100 characters.");
    }

    #[test]
    fn test_email_length() {
        let long_email = format!("{}@example.com", "a".repeat(150));
        let msg = bad_request_message(request(Some("Ana"), Some(&long_email)).into_new_user());
        assert_eq!(msg, "Email must be at most 100 characters.");

        let max_email = format!("{}@example.com", "a".repeat(88));
        assert_eq!(max_email.len(), 100);
        assert!(request(Some("Ana"), Some(&max_email)).into_new_user().is_ok());
    }

    #[test]
    fn test_valid_request() {
        let user = request(Some("Ana"), Some("ana@example.com"))
            .into_new_user()
            .unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");
    }
}
