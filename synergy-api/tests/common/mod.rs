/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (skips the suite when DATABASE_URL is not set)
/// - Test user creation and bearer token generation
/// - Request/response helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use std::env;
use synergy_api::app::{build_router, AppState};
use synergy_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use synergy_shared::auth::jwt::{create_token, Claims};
use synergy_shared::auth::password::hash_password;
use synergy_shared::db::migrations::run_migrations;
use synergy_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Signing secret used by every integration test
pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Plaintext password of the context's test user
pub const TEST_PASSWORD: &str = "Secret123!";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a test context against the database named by DATABASE_URL
    ///
    /// Returns `None` when DATABASE_URL is not set, so callers can skip
    /// the test on machines without a test database.
    pub async fn try_new() -> Option<Self> {
        let Ok(url) = env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        };

        let db = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");

        run_migrations(&db).await.expect("Failed to run migrations");

        let password_hash = hash_password(TEST_PASSWORD).expect("Failed to hash password");
        let user = User::create(
            &db,
            CreateUser {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash,
                name: Some("Test User".to_string()),
                avatar: None,
                role: None,
            },
        )
        .await
        .expect("Failed to create test user");

        let claims = Claims::new(user.id, user.email.clone());
        let token = create_token(&claims, TEST_JWT_SECRET).expect("Failed to create token");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext {
            db,
            app,
            user,
            token,
        })
    }

    /// Returns the authorization header value for the context's user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Sends a request to the app and returns (status, parsed JSON body)
///
/// The body value is `Null` when the response body is empty or not JSON
/// (e.g. the plaintext liveness endpoint).
pub async fn send_request(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Registers a fresh user through the API and returns (user JSON, token)
pub async fn register_user(ctx: &TestContext, name: &str) -> (serde_json::Value, String) {
    let email = format!("{}-{}@example.com", name, Uuid::new_v4());
    let (status, body) = send_request(
        ctx,
        "POST",
        "/users/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "password": TEST_PASSWORD,
            "name": name,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "register failed: {}", body);
    let token = body["token"].as_str().expect("token present").to_string();
    (body["user"].clone(), token)
}

/// Creates a project through the API and returns its JSON
pub async fn create_project(ctx: &TestContext, name: &str) -> serde_json::Value {
    let (status, body) = send_request(
        ctx,
        "POST",
        "/projects",
        Some(&ctx.auth_header()),
        Some(serde_json::json!({ "name": name, "status": "TODO" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create project failed: {}", body);
    body
}
