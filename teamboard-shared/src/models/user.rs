/// User model and database operations
///
/// A user owns at most one profile (`user_profile`) and can be a member of
/// any number of projects (`membership`). Deleting a user removes both
/// through `ON DELETE CASCADE`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
///
/// CREATE INDEX idx_users_email ON users (email);
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Unique constraint on `users.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// A person taking part in projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,

    /// Display name
    pub name: String,

    /// E-mail address, unique across all users
    pub email: String,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Input for updating a user
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns a unique violation on `users_email_key` if the e-mail is taken
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Finds a user by exact e-mail address
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Lists users ordered by ID
    pub async fn list<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    /// Applies a partial update
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns a unique violation if the new e-mail belongs to another user
    pub async fn update<'e, E>(executor: E, id: i32, data: UpdateUser) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email)
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Deletes a user together with their profile and memberships
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if the user didn't exist
    pub async fn delete<'e, E>(executor: E, id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
