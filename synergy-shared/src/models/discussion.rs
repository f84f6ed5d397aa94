/// Discussion and comment models
///
/// Discussions are per-project threads; comments form the ordered replies
/// inside a thread. Both are authored by a user and ordered by creation
/// time (discussions newest first, comments oldest first so a thread reads
/// top to bottom).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE discussions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id),
///     title VARCHAR(255) NOT NULL,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     discussion_id UUID NOT NULL REFERENCES discussions(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id),
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Discussion thread on a project
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Discussion {
    /// Unique discussion ID
    pub id: Uuid,

    /// Project the thread belongs to
    pub project_id: Uuid,

    /// User who opened the thread
    pub author_id: Uuid,

    /// Thread title
    pub title: String,

    /// Opening post content
    pub content: String,

    /// When the thread was opened
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new discussion
#[derive(Debug, Clone)]
pub struct CreateDiscussion {
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
}

/// Comment inside a discussion thread
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Thread the comment belongs to
    pub discussion_id: Uuid,

    /// User who wrote the comment
    pub author_id: Uuid,

    /// Comment content
    pub content: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,
}

/// Input for adding a comment to a discussion
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub discussion_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
}

impl Discussion {
    /// Creates a new discussion thread
    pub async fn create(pool: &PgPool, data: CreateDiscussion) -> Result<Self, sqlx::Error> {
        let discussion = sqlx::query_as::<_, Discussion>(
            r#"
            INSERT INTO discussions (project_id, author_id, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, author_id, title, content, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.author_id)
        .bind(data.title)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(discussion)
    }

    /// Finds a discussion by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let discussion = sqlx::query_as::<_, Discussion>(
            r#"
            SELECT id, project_id, author_id, title, content, created_at
            FROM discussions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(discussion)
    }

    /// Lists a project's discussions, newest first
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let discussions = sqlx::query_as::<_, Discussion>(
            r#"
            SELECT id, project_id, author_id, title, content, created_at
            FROM discussions
            WHERE project_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(discussions)
    }
}

impl Comment {
    /// Adds a comment to a discussion
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (discussion_id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, discussion_id, author_id, content, created_at
            "#,
        )
        .bind(data.discussion_id)
        .bind(data.author_id)
        .bind(data.content)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists a discussion's comments, oldest first
    pub async fn list_by_discussion(
        pool: &PgPool,
        discussion_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, discussion_id, author_id, content, created_at
            FROM comments
            WHERE discussion_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(discussion_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}
