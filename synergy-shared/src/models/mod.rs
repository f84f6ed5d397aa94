/// Database models for SynergySphere
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and credentials
/// - `project`: Projects with an owning user and an optional manager
/// - `task`: Tasks attached to a project and an assignee
/// - `discussion`: Per-project discussion threads and their comments
///
/// # Example
///
/// ```no_run
/// use synergy_shared::models::user::{CreateUser, User};
/// use synergy_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "user@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         name: Some("John Doe".to_string()),
///         avatar: None,
///         role: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod discussion;
pub mod project;
pub mod task;
pub mod user;
