/// Database bootstrap
///
/// - `pool`: connection pool, health checks and the connectivity self-test
/// - `migrations`: embedded schema migrations
///
/// Entity operations live in the `models` module at crate root.

pub mod migrations;
pub mod pool;

use crate::error::DbError;
use sqlx::PgPool;
use tracing::info;

/// Connects to the database and, if asked, applies pending migrations
///
/// # Errors
///
/// Returns [`DbError::Connection`] if the pool cannot be created and
/// [`DbError::Migration`] if a migration fails.
pub async fn init(config: &pool::DatabaseConfig, run_migrations: bool) -> Result<PgPool, DbError> {
    let pool = pool::create_pool(config).await?;

    if run_migrations {
        migrations::run_migrations(&pool).await?;
    } else {
        info!("Skipping database migrations");
    }

    Ok(pool)
}
