/// Discussion and comment endpoints
///
/// - `POST /discussions` - Open a thread on a project
/// - `GET /projects/:id/discussions` - List a project's threads
/// - `POST /discussions/:id/comments` - Add a comment to a thread
/// - `GET /discussions/:id/comments` - List a thread's comments
///
/// All operations require a bearer token, and the parent resource is
/// checked before any insert or listing so an unknown id is a 404, not a
/// foreign-key 500.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, Json},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synergy_shared::{
    auth::middleware::CurrentUser,
    models::{
        discussion::{Comment, CreateComment, CreateDiscussion, Discussion},
        project::Project,
    },
};
use uuid::Uuid;

/// Create discussion request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDiscussionRequest {
    /// Thread title (required)
    pub title: Option<String>,

    /// Opening post content (required)
    pub content: Option<String>,

    /// Project the thread belongs to (required)
    pub project_id: Option<Uuid>,
}

/// Add comment request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCommentRequest {
    /// Comment content (required)
    pub content: Option<String>,
}

/// Discussion as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Discussion> for DiscussionResponse {
    fn from(discussion: &Discussion) -> Self {
        Self {
            id: discussion.id,
            project_id: discussion.project_id,
            author_id: discussion.author_id,
            title: discussion.title.clone(),
            content: discussion.content.clone(),
            created_at: discussion.created_at,
        }
    }
}

/// Comment as returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub discussion_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            discussion_id: comment.discussion_id,
            author_id: comment.author_id,
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Open a discussion thread on a project
///
/// The author is the authenticated caller.
///
/// # Errors
///
/// - `400 Bad Request`: missing `title`, `content`, or `projectId`
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: unknown project
pub async fn create_discussion(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateDiscussionRequest>,
) -> ApiResult<(StatusCode, Json<DiscussionResponse>)> {
    let (Some(title), Some(content), Some(project_id)) = (req.title, req.content, req.project_id)
    else {
        return Err(ApiError::BadRequest(
            "title, content and projectId are required".to_string(),
        ));
    };

    Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let discussion = Discussion::create(
        &state.db,
        CreateDiscussion {
            project_id,
            author_id: current_user.id,
            title,
            content,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DiscussionResponse::from(&discussion)),
    ))
}

/// List a project's discussion threads, newest first
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: unknown project
pub async fn list_project_discussions(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DiscussionResponse>>> {
    Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    let discussions = Discussion::list_by_project(&state.db, project_id).await?;

    Ok(Json(
        discussions.iter().map(DiscussionResponse::from).collect(),
    ))
}

/// Add a comment to a discussion thread
///
/// The author is the authenticated caller.
///
/// # Errors
///
/// - `400 Bad Request`: missing `content`
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: unknown discussion
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(discussion_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let Some(content) = req.content else {
        return Err(ApiError::BadRequest("content is required".to_string()));
    };

    Discussion::find_by_id(&state.db, discussion_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Discussion not found".to_string()))?;

    let comment = Comment::create(
        &state.db,
        CreateComment {
            discussion_id,
            author_id: current_user.id,
            content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// List a discussion's comments, oldest first
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid bearer token
/// - `404 Not Found`: unknown discussion
pub async fn list_comments(
    State(state): State<AppState>,
    Path(discussion_id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    Discussion::find_by_id(&state.db, discussion_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Discussion not found".to_string()))?;

    let comments = Comment::list_by_discussion(&state.db, discussion_id).await?;

    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_discussion_request_rejects_author_field() {
        // The author is always the authenticated caller.
        let body = r#"{"title":"T","content":"C","projectId":"550e8400-e29b-41d4-a716-446655440000","authorId":"550e8400-e29b-41d4-a716-446655440001"}"#;
        let result: Result<CreateDiscussionRequest, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_comment_request_minimal() {
        let req: CreateCommentRequest = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
        assert_eq!(req.content.as_deref(), Some("hi"));
    }
}
