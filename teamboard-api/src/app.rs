/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use teamboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = teamboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                              # Service info
/// ├── GET  /health                        # Health check
/// ├── /projects
/// │   ├── POST   /                        # Create project
/// │   ├── GET    /                        # List projects
/// │   ├── GET    /:id                     # Project with its tasks
/// │   ├── PUT    /:id                     # Partial update
/// │   ├── DELETE /:id                     # Delete (cascades)
/// │   ├── GET    /:id/users               # Members
/// │   ├── POST   /:id/users/:user_id      # Add member
/// │   └── DELETE /:id/users/:user_id      # Remove member
/// ├── /tasks
/// │   ├── POST   /projects/:id/tasks      # Create task in project
/// │   ├── GET    /                        # List (?project_id=)
/// │   ├── GET    /statuses                # Permitted statuses
/// │   └── GET|PUT|DELETE /:id
/// └── /users
///     ├── POST   /                        # Create user
///     ├── GET    /                        # List users
///     ├── GET|PUT|DELETE /:id
///     ├── GET    /:id/projects            # Projects of user
///     └── POST|GET|PUT|DELETE /:id/profile
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    let project_routes = Router::new()
        .route(
            "/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/:id/users", get(routes::projects::list_project_users))
        .route(
            "/:id/users/:user_id",
            post(routes::projects::add_user_to_project)
                .delete(routes::projects::remove_user_from_project),
        );

    let task_routes = Router::new()
        .route("/statuses", get(routes::tasks::list_statuses))
        .route("/projects/:id/tasks", post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    let user_routes = Router::new()
        .route(
            "/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/:id/projects", get(routes::users::list_user_projects))
        .route(
            "/:id/profile",
            post(routes::users::create_profile)
                .get(routes::users::get_profile)
                .put(routes::users::update_profile)
                .delete(routes::users::delete_profile),
        );

    // Collections answer with and without the trailing slash
    let projects = post(routes::projects::create_project).get(routes::projects::list_projects);
    let tasks = get(routes::tasks::list_tasks);
    let users = post(routes::users::create_user).get(routes::users::list_users);

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(routes::root::service_info))
        .route("/health", get(routes::health::health_check))
        .route("/projects", projects.clone())
        .route("/projects/", projects)
        .route("/tasks", tasks.clone())
        .route("/tasks/", tasks)
        .route("/users", users.clone())
        .route("/users/", users)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes)
        .nest("/users", user_routes)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        )
        .with_state(state)
}

/// CORS policy from configuration
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}
