/// Database migration runner
///
/// Migrations are stored in the `migrations/` directory at the crate root
/// and are embedded into the binary at compile time. Each migration is a
/// pair of files:
/// - `{version}_{name}.up.sql` - The "up" migration
/// - `{version}_{name}.down.sql` - The rollback
///
/// The API server runs all pending migrations at startup, so a fresh
/// database is usable without any manual schema step.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the database connection is lost mid-run. A failed migration
/// is rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
