/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks/projects/:id/tasks` - Create task in a project
/// - `GET /tasks` - List tasks (`?project_id=&skip=&limit=`)
/// - `GET /tasks/statuses` - Permitted status values
/// - `GET /tasks/:id` - Get task
/// - `PUT /tasks/:id` - Partial update
/// - `DELETE /tasks/:id` - Delete task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ValidatedJson, ValidatedPath, ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use teamboard_shared::{
    models::{project::Project, task::Task},
    schemas::{TaskCreate, TaskListQuery, TaskResponse, TaskStatus, TaskUpdate},
};

/// Create task in a project
///
/// The body repeats the project id; it must match the one in the URL.
///
/// # Endpoint
///
/// ```text
/// POST /tasks/projects/1/tasks
/// Content-Type: application/json
///
/// {
///   "title": "Wireframes",
///   "status": "IN_PROGRESS",
///   "due_date": "2025-03-01",
///   "project_id": 1
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 3,
///   "title": "Wireframes",
///   "status": "IN_PROGRESS",
///   "due_date": "2025-03-01",
///   "project_id": 1
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Body and URL name different projects
/// - `404 Not Found`: No such project
/// - `422 Unprocessable Entity`: Validation failed (unknown status, bad date, empty title)
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedPath(project_id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<TaskCreate>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let mut tx = state.db.begin().await?;

    if !Project::exists(&mut *tx, project_id).await? {
        return Err(ApiError::not_found("Project", project_id));
    }

    if req.project_id != project_id {
        return Err(ApiError::BadRequest(format!(
            "Project ID in URL ({}) and body ({}) must match",
            project_id, req.project_id
        )));
    }

    let task = Task::create(&mut *tx, req.into_new_task(project_id)).await?;
    tx.commit().await?;

    tracing::info!(task_id = task.id, project_id, status = %task.status, "Task created");

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// List tasks, optionally restricted to one project
///
/// An empty `project_id` (`?project_id=`) is the same as leaving it out.
pub async fn list_tasks(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TaskListQuery>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let page = query.pagination();
    let mut conn = state.db.acquire().await?;

    let tasks = Task::list(&mut *conn, query.filter(), page.limit, page.skip).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Permitted task statuses, in workflow order
///
/// ```json
/// ["TODO", "IN_PROGRESS", "DONE"]
/// ```
pub async fn list_statuses() -> Json<Vec<TaskStatus>> {
    Json(TaskStatus::all().to_vec())
}

/// Get task
///
/// # Errors
///
/// - `404 Not Found`: No such task
pub async fn get_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<Json<TaskResponse>> {
    let mut conn = state.db.acquire().await?;

    let task = Task::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;

    Ok(Json(task.into()))
}

/// Update task
///
/// # Errors
///
/// - `404 Not Found`: No such task
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<TaskUpdate>,
) -> ApiResult<Json<TaskResponse>> {
    let mut tx = state.db.begin().await?;

    let task = Task::update(&mut *tx, id, req.into())
        .await?
        .ok_or_else(|| ApiError::not_found("Task", id))?;

    tx.commit().await?;

    tracing::info!(task_id = id, status = %task.status, "Task updated");

    Ok(Json(task.into()))
}

/// Delete task
pub async fn delete_task(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;

    if !Task::delete(&mut *tx, id).await? {
        return Err(ApiError::not_found("Task", id));
    }

    tx.commit().await?;

    tracing::info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
