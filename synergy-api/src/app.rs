/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use synergy_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use synergy_shared::auth::middleware::create_bearer_middleware;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                          # Liveness (public)
/// ├── GET  /health                    # Health check (public)
/// ├── /users/                         # Public
/// │   ├── POST /register
/// │   └── POST /login
/// ├── /projects/                      # Bearer token required
/// │   ├── POST /
/// │   ├── GET  /
/// │   └── GET  /:id/discussions
/// ├── /tasks/                         # Bearer token required
/// │   ├── POST /
/// │   └── GET  /
/// └── /discussions/                   # Bearer token required
///     ├── POST /
///     ├── POST /:id/comments
///     └── GET  /:id/comments
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Bearer authentication (protected groups only)
pub fn build_router(state: AppState) -> Router {
    // Liveness and health (public, no auth)
    let health_routes = Router::new()
        .route("/", get(routes::health::liveness))
        .route("/health", get(routes::health::health_check));

    // User routes (public, no auth required)
    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login));

    // Every project/task/discussion operation requires a bearer token
    let bearer_auth =
        axum::middleware::from_fn(create_bearer_middleware(state.jwt_secret().to_string()));

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/:id/discussions",
            get(routes::discussions::list_project_discussions),
        );

    let task_routes = Router::new().route(
        "/",
        post(routes::tasks::create_task).get(routes::tasks::list_tasks),
    );

    let discussion_routes = Router::new()
        .route("/", post(routes::discussions::create_discussion))
        .route(
            "/:id/comments",
            post(routes::discussions::create_comment).get(routes::discussions::list_comments),
        );

    let protected_routes = Router::new()
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/discussions", discussion_routes)
        .layer(bearer_auth);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
