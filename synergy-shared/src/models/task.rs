/// Task model and database operations
///
/// Tasks are the unit of work on a project board. Every task belongs to
/// exactly one project and is assigned to exactly one user at creation.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     tags TEXT[] NOT NULL DEFAULT '{}',
///     due_date TIMESTAMPTZ,
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assignee_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The JSON wire form of `status` is `"To-Do" | "In Progress" | "Done"`
/// and of `priority` is `"Low" | "Medium" | "High"`, the board-column
/// labels the task views render verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task board status
///
/// Transitions are unconstrained field overwrites: nothing prevents moving
/// a done task back to the to-do column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Queued, not yet started
    #[serde(rename = "To-Do")]
    Todo,

    /// Actively being worked
    #[serde(rename = "In Progress")]
    InProgress,

    /// Finished
    #[serde(rename = "Done")]
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// Wire-format string for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To-Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    /// Wire-format string for this priority
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional long-form description
    pub description: Option<String>,

    /// Board column the task sits in
    pub status: TaskStatus,

    /// Priority, defaults to medium
    pub priority: TaskPriority,

    /// Free-form tags, defaults to empty
    pub tags: Vec<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Project this task belongs to
    pub project_id: Uuid,

    /// User the task is delegated to
    pub assignee_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (callers default this to to-do when unset)
    pub status: TaskStatus,

    /// Priority (callers default this to medium when unset)
    pub priority: TaskPriority,

    /// Tags (callers default this to empty when unset)
    pub tags: Vec<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Project the task belongs to
    pub project_id: Uuid,

    /// Assigned user
    pub assignee_id: Uuid,
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if `project_id` or `assignee_id` does not reference
    /// an existing row (foreign-key violation) or the database is
    /// unreachable.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, tags, due_date, project_id, assignee_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, status, priority, tags, due_date,
                      project_id, assignee_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.tags)
        .bind(data.due_date)
        .bind(data.project_id)
        .bind(data.assignee_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, tags, due_date,
                   project_id, assignee_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks, newest first
    ///
    /// No filtering or pagination; the relations are loaded separately by
    /// the caller.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, tags, due_date,
                   project_id, assignee_id, created_at, updated_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists all tasks belonging to one project, newest first
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, tags, due_date,
                   project_id, assignee_id, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Counts total number of tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "To-Do");
        assert_eq!(TaskStatus::InProgress.as_str(), "In Progress");
        assert_eq!(TaskStatus::Done.as_str(), "Done");
    }

    #[test]
    fn test_task_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_task_status_wire_format() {
        let json = serde_json::to_string(&TaskStatus::Todo).unwrap();
        assert_eq!(json, "\"To-Do\"");

        let parsed: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);
    }

    #[test]
    fn test_task_priority_wire_format() {
        let json = serde_json::to_string(&TaskPriority::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");

        let parsed: TaskPriority = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(parsed, TaskPriority::Low);
    }
}
