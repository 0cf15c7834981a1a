/// Task model and database operations
///
/// Every task belongs to exactly one project. The reference is fixed at
/// creation and removed with the project (`ON DELETE CASCADE`).
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('TODO', 'IN_PROGRESS', 'DONE');
///
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     title VARCHAR(200) NOT NULL,
///     status task_status NOT NULL DEFAULT 'TODO',
///     due_date DATE
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use std::fmt;

/// Foreign key from `tasks.project_id` to `projects.id`
pub const PROJECT_FK_CONSTRAINT: &str = "tasks_project_id_fkey";

/// Progress of a task
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl TaskStatus {
    /// Every permitted status, in workflow order
    pub fn all() -> [TaskStatus; 3] {
        [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
    }

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    /// Owning project
    pub project_id: i32,

    pub title: String,

    pub status: TaskStatus,

    /// Optional deadline
    pub due_date: Option<NaiveDate>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub project_id: i32,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// Input for updating a task; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

/// Equality filters for [`Task::list`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub project_id: Option<i32>,
}

impl Task {
    /// Inserts a new task
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation (`tasks_project_id_fkey`) if the
    /// project does not exist.
    pub async fn create<'e, E>(executor: E, data: CreateTask) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, status, due_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, project_id, title, status, due_date
            "#,
        )
        .bind(data.project_id)
        .bind(data.title)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_one(executor)
        .await?;

        Ok(task)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, status, due_date
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    /// Lists tasks ordered by ID, optionally restricted to one project
    pub async fn list<'e, E>(
        executor: E,
        filter: TaskFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, status, due_date
            FROM tasks
            WHERE ($1::INTEGER IS NULL OR project_id = $1)
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.project_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(tasks)
    }

    /// All tasks of one project, ordered by ID
    pub async fn list_by_project<'e, E>(executor: E, project_id: i32) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, status, due_date
            FROM tasks
            WHERE project_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(executor)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update, returning None if the task doesn't exist
    pub async fn update<'e, E>(executor: E, id: i32, data: UpdateTask) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                status = COALESCE($3, status),
                due_date = COALESCE($4, due_date)
            WHERE id = $1
            RETURNING id, project_id, title, status, due_date
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }

    /// Deletes a task, returning whether a row was removed
    pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_project<'e, E>(executor: E, project_id: i32) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
