/// Project model and database operations
///
/// A project owns its tasks (one-to-many) and is shared with users through
/// the `user_project` join table (many-to-many, see `membership`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL CHECK (char_length(name) >= 1),
///     description VARCHAR(500)
/// );
/// ```
///
/// Deleting a project cascades to `tasks` and `user_project` through their
/// foreign keys, so [`Project::delete`] is a single statement.
///
/// # Example
///
/// ```no_run
/// use teamboard_shared::models::project::{CreateProject, Project};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let project = Project::create(&pool, CreateProject {
///     name: "Website redesign".to_string(),
///     description: None,
/// }).await?;
///
/// let found = Project::find_by_id(&pool, project.id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// A collaborative project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: i32,

    /// Project name (1-100 characters)
    pub name: String,

    /// Optional free-form description (up to 500 characters)
    pub description: Option<String>,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating a project
///
/// Only `Some` fields are written; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Project {
    /// Inserts a new project
    ///
    /// # Returns
    ///
    /// The stored project with its generated ID
    ///
    /// # Errors
    ///
    /// Returns an error if the name violates the length check or the
    /// connection fails
    pub async fn create<'e, E>(executor: E, data: CreateProject) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .fetch_one(executor)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    ///
    /// # Returns
    ///
    /// The project if found, None otherwise
    pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(project)
    }

    /// Checks whether a project exists
    pub async fn exists<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    /// Lists projects ordered by ID
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of projects to return
    /// * `offset` - Number of projects to skip
    pub async fn list<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description
            FROM projects
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(projects)
    }

    /// Applies a partial update
    ///
    /// # Returns
    ///
    /// The updated project, or None if no project has this ID
    pub async fn update<'e, E>(
        executor: E,
        id: i32,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .fetch_optional(executor)
        .await?;

        Ok(project)
    }

    /// Deletes a project together with its tasks and memberships
    ///
    /// # Returns
    ///
    /// True if the project was deleted, false if it didn't exist
    pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
