/// Project endpoints
///
/// # Endpoints
///
/// - `POST /projects` - Create project
/// - `GET /projects` - List projects (`?skip=&limit=`)
/// - `GET /projects/:id` - Project with its tasks
/// - `PUT /projects/:id` - Partial update
/// - `DELETE /projects/:id` - Delete project, its tasks and memberships
/// - `GET /projects/:id/users` - Members of a project
/// - `POST /projects/:id/users/:user_id` - Add member
/// - `DELETE /projects/:id/users/:user_id` - Remove member
///
/// Writes run in a transaction: existence checks and the mutation commit
/// together, and any early return rolls back.

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
    models::{membership::ProjectMembership, project::Project, task::Task, user::User},
    schemas::{
        MembershipResponse, Pagination, ProjectCreate, ProjectMembers, ProjectResponse,
        ProjectUpdate, ProjectWithTasks,
    },
};

/// Create project
///
/// # Endpoint
///
/// ```text
/// POST /projects
/// Content-Type: application/json
///
/// {
///   "name": "Website redesign",
///   "description": "Q3 marketing site"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "name": "Website redesign",
///   "description": "Q3 marketing site"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_project(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProjectCreate>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let mut tx = state.db.begin().await?;
    let project = Project::create(&mut *tx, req.into()).await?;
    tx.commit().await?;

    tracing::info!(project_id = project.id, name = %project.name, "Project created");

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// List projects, ordered by id
pub async fn list_projects(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<Pagination>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let mut conn = state.db.acquire().await?;
    let projects = Project::list(&mut *conn, page.limit, page.skip).await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// Get project with its tasks
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "name": "Website redesign",
///   "description": null,
///   "tasks": [
///     {"id": 3, "title": "Wireframes", "status": "TODO", "due_date": null, "project_id": 1}
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such project
pub async fn get_project(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<Json<ProjectWithTasks>> {
    let mut conn = state.db.acquire().await?;

    let project = Project::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    let tasks = Task::list_by_project(&mut *conn, id).await?;

    Ok(Json(ProjectWithTasks::new(project, tasks)))
}

/// Update project
///
/// Only the fields present in the body change.
///
/// # Errors
///
/// - `404 Not Found`: No such project
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_project(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<ProjectUpdate>,
) -> ApiResult<Json<ProjectResponse>> {
    let mut tx = state.db.begin().await?;

    let project = Project::update(&mut *tx, id, req.into())
        .await?
        .ok_or_else(|| ApiError::not_found("Project", id))?;

    tx.commit().await?;

    tracing::info!(project_id = id, "Project updated");

    Ok(Json(project.into()))
}

/// Delete project
///
/// Tasks and memberships of the project go with it; users are untouched.
///
/// # Errors
///
/// - `404 Not Found`: No such project
pub async fn delete_project(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;

    if !Project::delete(&mut *tx, id).await? {
        return Err(ApiError::not_found("Project", id));
    }

    tx.commit().await?;

    tracing::info!(project_id = id, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Add user to project
///
/// # Endpoint
///
/// ```text
/// POST /projects/1/users/2
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "User 2 added to project 1",
///   "project_id": 1,
///   "user_id": 2
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: User is already a member
/// - `404 Not Found`: No such project or user
pub async fn add_user_to_project(
    State(state): State<AppState>,
    ValidatedPath((project_id, user_id)): ValidatedPath<(i32, i32)>,
) -> ApiResult<Json<MembershipResponse>> {
    let mut tx = state.db.begin().await?;

    ensure_project_and_user(&mut tx, project_id, user_id).await?;

    if ProjectMembership::exists(&mut *tx, project_id, user_id).await? {
        return Err(ApiError::BadRequest(
            "User is already a member of this project".to_string(),
        ));
    }

    ProjectMembership::add(&mut *tx, project_id, user_id).await?;
    tx.commit().await?;

    tracing::info!(project_id, user_id, "User added to project");

    Ok(Json(MembershipResponse::added(project_id, user_id)))
}

/// Remove user from project
///
/// # Errors
///
/// - `400 Bad Request`: User is not a member
/// - `404 Not Found`: No such project or user
pub async fn remove_user_from_project(
    State(state): State<AppState>,
    ValidatedPath((project_id, user_id)): ValidatedPath<(i32, i32)>,
) -> ApiResult<Json<MembershipResponse>> {
    let mut tx = state.db.begin().await?;

    ensure_project_and_user(&mut tx, project_id, user_id).await?;

    if !ProjectMembership::remove(&mut *tx, project_id, user_id).await? {
        return Err(ApiError::BadRequest(
            "User is not a member of this project".to_string(),
        ));
    }

    tx.commit().await?;

    tracing::info!(project_id, user_id, "User removed from project");

    Ok(Json(MembershipResponse::removed(project_id, user_id)))
}

/// List members of a project
///
/// # Response
///
/// ```json
/// {
///   "project_id": 1,
///   "project_name": "Website redesign",
///   "users_count": 1,
///   "users": [{"id": 2, "name": "Ada", "email": "ada@example.com"}]
/// }
/// ```
pub async fn list_project_users(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<Json<ProjectMembers>> {
    let mut conn = state.db.acquire().await?;

    let project = Project::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project", id))?;
    let users = ProjectMembership::list_users(&mut *conn, id).await?;

    Ok(Json(ProjectMembers::new(project, users)))
}

async fn ensure_project_and_user(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    project_id: i32,
    user_id: i32,
) -> ApiResult<()> {
    if !Project::exists(&mut **tx, project_id).await? {
        return Err(ApiError::not_found("Project", project_id));
    }

    if User::find_by_id(&mut **tx, user_id).await?.is_none() {
        return Err(ApiError::not_found("User", user_id));
    }

    Ok(())
}
