/// User and profile endpoints
///
/// # Endpoints
///
/// - `POST /users` - Create user
/// - `GET /users` - List users (`?skip=&limit=`)
/// - `GET /users/:id` - User with profile
/// - `PUT /users/:id` - Partial update
/// - `DELETE /users/:id` - Delete user, profile and memberships
/// - `GET /users/:id/projects` - Projects the user belongs to
/// - `POST /users/:id/profile` - Create profile
/// - `GET /users/:id/profile` - Get profile
/// - `PUT /users/:id/profile` - Partial profile update
/// - `DELETE /users/:id/profile` - Delete profile
///
/// E-mail addresses are unique; a user has at most one profile.

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
use sqlx::PgConnection;
use teamboard_shared::{
    models::{membership::ProjectMembership, user::User, user_profile::UserProfile},
    schemas::{
        Pagination, ProjectResponse, UserCreate, UserProfileCreate, UserProfileResponse,
        UserProfileUpdate, UserResponse, UserUpdate, UserWithProfile,
    },
};

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 2,
///   "name": "Ada Lovelace",
///   "email": "ada@example.com"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: E-mail already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UserCreate>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let mut tx = state.db.begin().await?;

    if User::find_by_email(&mut *tx, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let user = User::create(&mut *tx, req.into()).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(page): ValidatedQuery<Pagination>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let mut conn = state.db.acquire().await?;
    let users = User::list(&mut *conn, page.limit, page.skip).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user with profile
///
/// # Response
///
/// ```json
/// {
///   "id": 2,
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "profile": {"id": 1, "user_id": 2, "bio": "Analyst", "phone_number": null}
/// }
/// ```
///
/// `profile` is `null` when the user has none.
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<Json<UserWithProfile>> {
    let mut conn = state.db.acquire().await?;

    let user = find_user(&mut conn, id).await?;
    let profile = UserProfile::find_by_user(&mut *conn, id).await?;

    Ok(Json(UserWithProfile::new(user, profile)))
}

/// Update user
///
/// # Errors
///
/// - `404 Not Found`: No such user
/// - `409 Conflict`: New e-mail belongs to another user
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<UserUpdate>,
) -> ApiResult<Json<UserResponse>> {
    let mut tx = state.db.begin().await?;

    find_user(&mut tx, id).await?;

    if let Some(email) = &req.email {
        if let Some(owner) = User::find_by_email(&mut *tx, email).await? {
            if owner.id != id {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }
    }

    let user = User::update(&mut *tx, id, req.into())
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    tx.commit().await?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(user.into()))
}

/// Delete user
///
/// The profile and memberships go with the user; projects are untouched.
pub async fn delete_user(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;

    if !User::delete(&mut *tx, id).await? {
        return Err(ApiError::not_found("User", id));
    }

    tx.commit().await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Projects the user is a member of, ordered by id
pub async fn list_user_projects(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let mut conn = state.db.acquire().await?;

    find_user(&mut conn, id).await?;
    let projects = ProjectMembership::list_projects(&mut *conn, id).await?;

    Ok(Json(projects.into_iter().map(ProjectResponse::from).collect()))
}

/// Create profile
///
/// # Endpoint
///
/// ```text
/// POST /users/2/profile
/// Content-Type: application/json
///
/// {
///   "bio": "Analyst",
///   "phone_number": "+44 20 7946 0000"
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such user
/// - `409 Conflict`: User already has a profile
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_profile(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<UserProfileCreate>,
) -> ApiResult<(StatusCode, Json<UserProfileResponse>)> {
    let mut tx = state.db.begin().await?;

    find_user(&mut tx, user_id).await?;

    if UserProfile::find_by_user(&mut *tx, user_id).await?.is_some() {
        return Err(ApiError::Conflict("User already has a profile".to_string()));
    }

    let profile = UserProfile::create(&mut *tx, user_id, req.into()).await?;
    tx.commit().await?;

    tracing::info!(user_id, profile_id = profile.id, "Profile created");

    Ok((StatusCode::CREATED, Json(profile.into())))
}

pub async fn get_profile(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
) -> ApiResult<Json<UserProfileResponse>> {
    let mut conn = state.db.acquire().await?;

    find_user(&mut conn, user_id).await?;

    let profile = UserProfile::find_by_user(&mut *conn, user_id)
        .await?
        .ok_or_else(|| profile_not_found(user_id))?;

    Ok(Json(profile.into()))
}

/// Update profile
///
/// # Errors
///
/// - `404 Not Found`: No such user, or the user has no profile
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_profile(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
    ValidatedJson(req): ValidatedJson<UserProfileUpdate>,
) -> ApiResult<Json<UserProfileResponse>> {
    let mut tx = state.db.begin().await?;

    find_user(&mut tx, user_id).await?;

    let profile = UserProfile::update_by_user(&mut *tx, user_id, req.into())
        .await?
        .ok_or_else(|| profile_not_found(user_id))?;

    tx.commit().await?;

    tracing::info!(user_id, "Profile updated");

    Ok(Json(profile.into()))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    ValidatedPath(user_id): ValidatedPath<i32>,
) -> ApiResult<StatusCode> {
    let mut tx = state.db.begin().await?;

    find_user(&mut tx, user_id).await?;

    if !UserProfile::delete_by_user(&mut *tx, user_id).await? {
        return Err(profile_not_found(user_id));
    }

    tx.commit().await?;

    tracing::info!(user_id, "Profile deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Loads a user or fails with 404
///
/// Takes the connection behind either a pooled connection or a transaction.
async fn find_user(conn: &mut PgConnection, id: i32) -> ApiResult<User> {
    User::find_by_id(conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))
}

fn profile_not_found(user_id: i32) -> ApiError {
    ApiError::NotFound(format!("Profile for user with ID {} not found", user_id))
}
