/// Persistent entities and their store operations
///
/// # Models
///
/// - `user`: people taking part in projects
/// - `user_profile`: optional per-user profile (one-to-one)
/// - `project`: collaborative projects
/// - `task`: work items owned by a project (one-to-many)
/// - `membership`: user ↔ project join table (many-to-many)
///
/// Every operation is generic over `sqlx::PgExecutor`, so the same call
/// works against the pool, a pooled connection, or an open transaction:
///
/// ```no_run
/// use teamboard_shared::models::project::{CreateProject, Project};
/// use teamboard_shared::models::task::{CreateTask, Task, TaskStatus};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
///
/// let project = Project::create(&mut *tx, CreateProject {
///     name: "Launch".to_string(),
///     description: None,
/// }).await?;
///
/// Task::create(&mut *tx, CreateTask {
///     project_id: project.id,
///     title: "Write announcement".to_string(),
///     status: TaskStatus::Todo,
///     due_date: None,
/// }).await?;
///
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod membership;
pub mod project;
pub mod task;
pub mod user;
pub mod user_profile;
