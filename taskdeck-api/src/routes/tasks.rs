/// Task CRUD endpoints
///
/// All routes here sit behind the bearer guard, which injects the
/// authenticated [`CurrentUser`]. Every operation is scoped to that user:
/// tasks owned by someone else 404 exactly like tasks that don't exist.
///
/// # Endpoints
///
/// - `GET    /tasks` - List the caller's tasks (paginated)
/// - `POST   /tasks` - Create a task owned by the caller
/// - `GET    /tasks/:id` - Fetch one task
/// - `PUT    /tasks/:id` - Partially update one task
/// - `DELETE /tasks/:id` - Delete one task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::middleware::CurrentUser,
    models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask},
};
use validator::Validate;

/// Pagination parameters for task listing
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Number of tasks to skip
    #[serde(default)]
    pub skip: i64,

    /// Maximum number of tasks to return
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// Initial status (not-started when omitted)
    pub status: Option<TaskStatus>,

    /// Priority (medium when omitted)
    pub priority: Option<TaskPriority>,
}

/// Update task request
///
/// All fields optional; omitted fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// Lists the caller's tasks in insertion order
///
/// # Endpoint
///
/// ```text
/// GET /tasks?skip=0&limit=100
/// Authorization: Bearer <token>
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    // Negative values would be SQL errors; treat them as empty bounds
    let skip = query.skip.max(0);
    let limit = query.limit.max(0);

    let tasks = Task::list_by_owner(&state.db, current.user_id, skip, limit).await?;

    Ok(Json(tasks))
}

/// Creates a task owned by the caller
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Write launch notes",
///   "description": "One page, plain language",
///   "priority": "high"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: current.user_id,
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
        },
    )
    .await?;

    Ok(Json(task))
}

/// Fetches one task by id
///
/// # Errors
///
/// - `404 Not Found`: No such task owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id, current.user_id)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Partially updates one task
///
/// Only fields present in the body change; `updated_at` is refreshed.
///
/// # Errors
///
/// - `404 Not Found`: No such task owned by the caller
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = Task::update(
        &state.db,
        id,
        current.user_id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
        },
    )
    .await?
    .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Deletes one task
///
/// Deletion is not idempotent at the HTTP level: the second delete of the
/// same id returns 404, matching reads of nonexistent tasks.
///
/// # Errors
///
/// - `404 Not Found`: No such task owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete(&state.db, id, current.user_id).await?;
    if !deleted {
        return Err(task_not_found());
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
