/// Schema migrations
///
/// The migration files live in `migrations/` at the workspace root and are
/// embedded into the binary at compile time, so a deployed server can bring
/// an empty database up to date on its own.
///
/// # Example
///
/// ```no_run
/// use teamboard_shared::db::migrations::{get_migration_status, run_migrations};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// run_migrations(&pool).await?;
///
/// let status = get_migration_status(&pool).await?;
/// assert!(status.is_up_to_date);
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, migrate::Migrator, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Migrations embedded from the workspace `migrations/` directory
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Number of migrations applied successfully
    pub applied_migrations: usize,

    /// Number of migrations embedded in this build
    pub known_migrations: usize,

    /// Latest applied migration version (timestamp)
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Applies every pending migration
///
/// Each migration runs in its own transaction; a failing one is rolled back
/// and reported.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Number of forward migrations embedded in this build
pub fn known_migration_count() -> usize {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count()
}

/// Reports how far the database is from the embedded migrations
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    debug!("Checking migration status");

    let known_migrations = known_migration_count();

    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            known_migrations,
            latest_version: None,
            is_up_to_date: known_migrations == 0,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version)
         FROM _sqlx_migrations
         WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    let applied_migrations = count as usize;

    debug!(
        applied_migrations,
        known_migrations,
        latest_version = ?latest_version,
        "Migration status retrieved"
    );

    Ok(MigrationStatus {
        applied_migrations,
        known_migrations,
        latest_version,
        is_up_to_date: applied_migrations >= known_migrations,
    })
}

/// Creates the database named in `database_url` if it is missing
///
/// Intended for development and tests; production databases are provisioned
/// ahead of time.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
