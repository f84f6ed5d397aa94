/// Task endpoints
///
/// - `POST /tasks` - Create a task on a project, assigned to a user
/// - `GET /tasks` - List all tasks with their project and assignee
///   eager-loaded
///
/// Both operations require a bearer token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, Json},
    routes::{projects::ProjectResponse, users::UserResponse},
};
use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use synergy_shared::models::{
    project::Project,
    task::{CreateTask, Task, TaskPriority, TaskStatus},
    user::User,
};
use uuid::Uuid;

/// Create task request
///
/// `title`, `projectId`, and `assigneeId` are required; presence is
/// checked inline so a missing field yields a 400 with an error body, not
/// a deserialization rejection. `deadline` is the due-date input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTaskRequest {
    /// Task title (required)
    pub title: Option<String>,

    /// Project the task belongs to (required)
    pub project_id: Option<Uuid>,

    /// Assigned user (required)
    pub assignee_id: Option<Uuid>,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date (RFC 3339)
    pub deadline: Option<DateTime<Utc>>,

    /// Priority, defaults to "Medium"
    pub priority: Option<TaskPriority>,

    /// Tags, default empty
    pub tags: Option<Vec<String>>,

    /// Status, defaults to "To-Do"
    pub status: Option<TaskStatus>,
}

/// Task as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub project_id: Uuid,
    pub assignee_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            tags: task.tags.clone(),
            due_date: task.due_date,
            project_id: task.project_id,
            assignee_id: task.assignee_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Task with its relations eager-loaded, as returned by the list endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Project the task belongs to
    pub project: ProjectResponse,

    /// User the task is delegated to
    pub assignee: UserResponse,
}

/// Create task endpoint handler
///
/// # Errors
///
/// - `400 Bad Request`: missing `title`, `projectId`, or `assigneeId`
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `500 Internal Server Error`: unknown project/assignee or other
///   persistence failure
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let (Some(title), Some(project_id), Some(assignee_id)) =
        (req.title, req.project_id, req.assignee_id)
    else {
        return Err(ApiError::BadRequest(
            "title, projectId and assigneeId are required".to_string(),
        ));
    };

    let task = Task::create(
        &state.db,
        CreateTask {
            title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            tags: req.tags.unwrap_or_default(),
            due_date: req.deadline,
            project_id,
            assignee_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// List tasks endpoint handler
///
/// Returns every task with its project and assignee. No filtering or
/// pagination.
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskDetail>>> {
    let tasks = Task::list(&state.db).await?;

    let projects: HashMap<Uuid, Project> = Project::list(&state.db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut assignee_ids: Vec<Uuid> = tasks.iter().map(|t| t.assignee_id).collect();
    assignee_ids.sort_unstable();
    assignee_ids.dedup();

    let users: HashMap<Uuid, User> = User::find_by_ids(&state.db, &assignee_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut details = Vec::with_capacity(tasks.len());
    for task in &tasks {
        // Both relations are NOT NULL foreign keys, so a miss here means
        // the listing raced a delete; surface it as a server error.
        let project = projects
            .get(&task.project_id)
            .map(ProjectResponse::from)
            .ok_or_else(|| {
                ApiError::InternalError(format!("Project {} missing for task {}", task.project_id, task.id))
            })?;
        let assignee = users
            .get(&task.assignee_id)
            .map(UserResponse::from)
            .ok_or_else(|| {
                ApiError::InternalError(format!("Assignee {} missing for task {}", task.assignee_id, task.id))
            })?;

        details.push(TaskDetail {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            tags: task.tags.clone(),
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
            project,
            assignee,
        });
    }

    Ok(Json(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_defaults() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"title":"T1","projectId":"550e8400-e29b-41d4-a716-446655440000","assigneeId":"550e8400-e29b-41d4-a716-446655440001"}"#,
        )
        .unwrap();

        assert_eq!(req.title.as_deref(), Some("T1"));
        assert!(req.status.is_none());
        assert!(req.priority.is_none());
        assert!(req.tags.is_none());
        assert!(req.deadline.is_none());
    }

    #[test]
    fn test_create_task_request_rejects_unknown_fields() {
        let body = r#"{"title":"T1","projectId":"550e8400-e29b-41d4-a716-446655440000","assigneeId":"550e8400-e29b-41d4-a716-446655440001","ownerId":"x"}"#;
        let result: Result<CreateTaskRequest, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_task_request_accepts_wire_enums() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"title":"T1","projectId":"550e8400-e29b-41d4-a716-446655440000","assigneeId":"550e8400-e29b-41d4-a716-446655440001","status":"In Progress","priority":"High","tags":["backend","urgent"]}"#,
        )
        .unwrap();

        assert_eq!(req.status, Some(TaskStatus::InProgress));
        assert_eq!(req.priority, Some(TaskPriority::High));
        assert_eq!(req.tags.as_deref(), Some(&["backend".to_string(), "urgent".to_string()][..]));
    }
}
