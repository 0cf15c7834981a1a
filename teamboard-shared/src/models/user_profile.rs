/// User profile model (one-to-one with `users`)
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_profiles (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     bio VARCHAR(500),
///     phone_number VARCHAR(20)
/// );
/// ```
///
/// The unique constraint on `user_id` is what makes the relation one-to-one:
/// a second insert for the same user fails with `user_profiles_user_id_key`.

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Unique constraint on `user_profiles.user_id`
pub const USER_UNIQUE_CONSTRAINT: &str = "user_profiles_user_id_key";

/// Foreign key from `user_profiles.user_id` to `users.id`
pub const USER_FK_CONSTRAINT: &str = "user_profiles_user_id_fkey";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: i32,

    /// Owning user
    pub user_id: i32,

    pub bio: Option<String>,

    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserProfile {
    pub bio: Option<String>,
    pub phone_number: Option<String>,
}

/// Only non-None fields will be updated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserProfile {
    pub bio: Option<String>,
    pub phone_number: Option<String>,
}

impl UserProfile {
    /// Creates the profile of `user_id`
    ///
    /// # Errors
    ///
    /// - unique violation if the user already has a profile
    /// - foreign key violation if the user doesn't exist
    pub async fn create<'e, E>(
        executor: E,
        user_id: i32,
        data: CreateUserProfile,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (user_id, bio, phone_number)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, bio, phone_number
            "#,
        )
        .bind(user_id)
        .bind(data.bio)
        .bind(data.phone_number)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    pub async fn find_by_user<'e, E>(executor: E, user_id: i32) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, user_id, bio, phone_number
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    pub async fn update_by_user<'e, E>(
        executor: E,
        user_id: i32,
        data: UpdateUserProfile,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profiles
            SET bio = COALESCE($2, bio),
                phone_number = COALESCE($3, phone_number)
            WHERE user_id = $1
            RETURNING id, user_id, bio, phone_number
            "#,
        )
        .bind(user_id)
        .bind(data.bio)
        .bind(data.phone_number)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    /// Deletes the profile of `user_id`, returning whether one existed
    pub async fn delete_by_user<'e, E>(executor: E, user_id: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
