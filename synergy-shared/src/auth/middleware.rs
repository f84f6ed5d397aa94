/// Bearer authentication middleware for Axum
///
/// The middleware extracts the `Authorization: Bearer <token>` header,
/// validates the token, and inserts a [`CurrentUser`] into the request
/// extensions. Handlers extract it with Axum's `Extension` extractor.
///
/// The router applies this layer to every protected route group, so the
/// authentication requirement is a single explicit policy rather than a
/// per-route accident.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use synergy_shared::auth::middleware::{create_bearer_middleware, CurrentUser};
///
/// async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
///     user.email
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(create_bearer_middleware(
///         "your-secret-key-at-least-32-bytes-long",
///     )));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authenticated identity added to request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub id: Uuid,

    /// Email carried in the token claims
    pub email: String,
}

/// Error type for the authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization header".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::UNAUTHORIZED, msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}

/// Bearer authentication middleware
///
/// Validates the bearer token and injects [`CurrentUser`].
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing, is not a bearer
/// token, or the token fails validation.
pub async fn bearer_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken("Invalid token".to_string()),
    })?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
    };
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

/// Creates a bearer authentication middleware closure
///
/// Helper that captures the signing secret and returns a function usable
/// with `axum::middleware::from_fn`.
pub fn create_bearer_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(bearer_auth_middleware(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_into_response() {
        let err = AuthError::MissingCredentials;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidFormat("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidToken("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
