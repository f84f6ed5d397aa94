/// Project model and database operations
///
/// Projects are the top-level grouping in SynergySphere. Every project is
/// owned by the user who created it (the owner cannot be reassigned) and
/// may name a second user as manager. A project owns its task collection:
/// deleting a project cascades to its tasks and discussions.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('todo', 'in_progress', 'done');
/// CREATE TYPE project_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     description TEXT,
///     status project_status NOT NULL,
///     priority project_priority NOT NULL DEFAULT 'medium',
///     deadline TIMESTAMPTZ,
///     owner_id UUID NOT NULL REFERENCES users(id),
///     manager_id UUID REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The JSON wire form of `status` is `"TODO" | "IN_PROGRESS" | "DONE"` and
/// of `priority` is `"LOW" | "MEDIUM" | "HIGH"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Project lifecycle status
///
/// There are no transition guards: status is a plain field overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    /// Not started
    Todo,

    /// Work underway
    InProgress,

    /// Finished
    Done,
}

impl ProjectStatus {
    /// Wire-format string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Todo => "TODO",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Done => "DONE",
        }
    }
}

/// Project priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_priority", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
}

impl Default for ProjectPriority {
    fn default() -> Self {
        ProjectPriority::Medium
    }
}

impl ProjectPriority {
    /// Wire-format string for this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPriority::Low => "LOW",
            ProjectPriority::Medium => "MEDIUM",
            ProjectPriority::High => "HIGH",
        }
    }
}

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Current status
    pub status: ProjectStatus,

    /// Priority, defaults to medium
    pub priority: ProjectPriority,

    /// Optional deadline
    pub deadline: Option<DateTime<Utc>>,

    /// User who created the project; immutable after creation
    pub owner_id: Uuid,

    /// Optional managing user, distinct from ownership
    pub manager_id: Option<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status
    pub status: ProjectStatus,

    /// Priority (callers default this to medium when unset)
    pub priority: ProjectPriority,

    /// Optional deadline
    pub deadline: Option<DateTime<Utc>>,

    /// Owning user; always the authenticated creator
    pub owner_id: Uuid,

    /// Optional manager
    pub manager_id: Option<Uuid>,
}

impl Project {
    /// Creates a new project
    ///
    /// # Errors
    ///
    /// Returns an error if `owner_id` or `manager_id` does not reference an
    /// existing user (foreign-key violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, status, priority, deadline, owner_id, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, status, priority, deadline,
                      owner_id, manager_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.deadline)
        .bind(data.owner_id)
        .bind(data.manager_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, priority, deadline,
                   owner_id, manager_id, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists all projects, newest first
    ///
    /// Every authenticated caller sees every project; there is no
    /// ownership scoping or pagination.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, priority, deadline,
                   owner_id, manager_id, created_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Counts total number of projects
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_as_str() {
        assert_eq!(ProjectStatus::Todo.as_str(), "TODO");
        assert_eq!(ProjectStatus::InProgress.as_str(), "IN_PROGRESS");
        assert_eq!(ProjectStatus::Done.as_str(), "DONE");
    }

    #[test]
    fn test_project_priority_default() {
        assert_eq!(ProjectPriority::default(), ProjectPriority::Medium);
    }

    #[test]
    fn test_project_status_wire_format() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let parsed: ProjectStatus = serde_json::from_str("\"TODO\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Todo);

        // The frontend's old display vocabulary is not accepted
        assert!(serde_json::from_str::<ProjectStatus>("\"Active\"").is_err());
    }

    #[test]
    fn test_project_priority_wire_format() {
        let json = serde_json::to_string(&ProjectPriority::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");

        let parsed: ProjectPriority = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, ProjectPriority::High);
    }
}
