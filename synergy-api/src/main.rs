//! # SynergySphere API Server
//!
//! The REST API backing the SynergySphere project-management app:
//! registration and login, projects with owners and managers, task boards,
//! and per-project discussion threads.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/synergysphere \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p synergy-api
//! ```

use synergy_api::{
    app::{build_router, AppState},
    config::Config,
};
use synergy_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synergy_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "SynergySphere API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let addr = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
