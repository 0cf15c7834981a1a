/// Project membership (user ↔ project, many-to-many)
///
/// A row in `user_project` means the user takes part in the project. The row
/// carries no other attributes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_project (
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     CONSTRAINT user_project_pkey PRIMARY KEY (user_id, project_id)
/// );
/// ```
///
/// The composite primary key rejects duplicate memberships even when two
/// requests race past the application-level [`ProjectMembership::exists`]
/// check.
///
/// # Example
///
/// ```no_run
/// use teamboard_shared::models::membership::ProjectMembership;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, project_id: i32, user_id: i32) -> Result<(), sqlx::Error> {
/// if !ProjectMembership::exists(&pool, project_id, user_id).await? {
///     ProjectMembership::add(&pool, project_id, user_id).await?;
/// }
///
/// let members = ProjectMembership::list_users(&pool, project_id).await?;
/// println!("Project has {} members", members.len());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use super::{project::Project, user::User};

/// Composite primary key of `user_project`
pub const PRIMARY_KEY_CONSTRAINT: &str = "user_project_pkey";

/// Foreign key from `user_project.user_id` to `users.id`
pub const USER_FK_CONSTRAINT: &str = "user_project_user_id_fkey";

/// Foreign key from `user_project.project_id` to `projects.id`
pub const PROJECT_FK_CONSTRAINT: &str = "user_project_project_id_fkey";

/// A user's membership in a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMembership {
    pub user_id: i32,
    pub project_id: i32,
}

impl ProjectMembership {
    /// Adds a user to a project
    ///
    /// # Arguments
    ///
    /// * `executor` - Connection, pool or transaction
    /// * `project_id` - Project ID
    /// * `user_id` - User ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user is already a member (`user_project_pkey` violation)
    /// - The project or user doesn't exist (foreign key violation)
    /// - Database connection fails
    pub async fn add<'e, E>(executor: E, project_id: i32, user_id: i32) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let membership = sqlx::query_as::<_, ProjectMembership>(
            r#"
            INSERT INTO user_project (user_id, project_id)
            VALUES ($1, $2)
            RETURNING user_id, project_id
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(executor)
        .await?;

        Ok(membership)
    }

    /// Removes a user from a project
    ///
    /// # Returns
    ///
    /// True if the membership was removed, false if it didn't exist
    pub async fn remove<'e, E>(executor: E, project_id: i32, user_id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM user_project WHERE project_id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Checks whether a user is a member of a project
    pub async fn exists<'e, E>(executor: E, project_id: i32, user_id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_project
                WHERE project_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    /// Lists the users of a project, ordered by user ID
    pub async fn list_users<'e, E>(executor: E, project_id: i32) -> Result<Vec<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email
            FROM users u
            JOIN user_project up ON up.user_id = u.id
            WHERE up.project_id = $1
            ORDER BY u.id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    /// Lists the projects a user belongs to, ordered by project ID
    pub async fn list_projects<'e, E>(executor: E, user_id: i32) -> Result<Vec<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT p.id, p.name, p.description
            FROM projects p
            JOIN user_project up ON up.project_id = p.id
            WHERE up.user_id = $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(projects)
    }

    /// Counts the members of a project
    pub async fn count_by_project<'e, E>(executor: E, project_id: i32) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_project WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }

    /// Counts the projects a user belongs to
    pub async fn count_by_user<'e, E>(executor: E, user_id: i32) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_project WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
