/// User endpoints
///
/// - `POST /users/register` - Create an account, returns the user and a
///   bearer token
/// - `POST /users/login` - Verify credentials, returns the user and a
///   bearer token
///
/// Request bodies are explicit schemas: unknown fields are rejected
/// instead of being merged into the insert, and the password never
/// appears in any response body.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, Json},
};
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synergy_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before storage, never persisted in plaintext)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,

    /// Optional avatar URL
    pub avatar: Option<String>,

    /// Optional free-form role label
    #[validate(length(max = 100, message = "Role must be at most 100 characters"))]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// User as returned to clients
///
/// The password hash is deliberately absent; every response path goes
/// through this struct.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: Option<String>,

    /// Email address
    pub email: String,

    /// Avatar URL
    pub avatar: Option<String>,

    /// Role label
    pub role: Option<String>,

    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            role: user.role.clone(),
            created_at: user.created_at,
        }
    }
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Created user, password stripped
    pub user: UserResponse,

    /// Bearer token for subsequent requests
    pub token: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Human-readable confirmation
    pub message: String,

    /// Authenticated user, password stripped
    pub user: UserResponse,

    /// Bearer token for subsequent requests
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /users/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "secret-password",
///   "name": "John Doe"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid body, unknown fields, or duplicate email
/// - `500 Internal Server Error`: persistence failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
            avatar: req.avatar,
            role: req.role,
        },
    )
    .await?;

    let claims = jwt::Claims::new(user.id, user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(RegisterResponse {
        user: UserResponse::from(&user),
        token,
    }))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /users/login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "secret-password"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: no account with that email
/// - `401 Unauthorized`: wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No account with that email".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Incorrect password".to_string()));
    }

    let claims = jwt::Claims::new(user.id, user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserResponse::from(&user),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_unknown_fields() {
        let body = r#"{"email":"a@x.com","password":"longenough","isAdmin":true}"#;
        let result: Result<RegisterRequest, _> = serde_json::from_str(body);
        assert!(result.is_err(), "Unknown fields must be rejected");
    }

    #[test]
    fn test_register_request_validation() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"not-an-email","password":"longenough"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"short"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"longenough"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            name: Some("A".to_string()),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            avatar: None,
            role: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }
}
