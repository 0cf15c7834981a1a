//! Database connectivity self-test
//!
//! Connects with the server's configuration, runs a trivial query and
//! reports the migration state. Exits non-zero when the database cannot be
//! reached.
//!
//! ```bash
//! cargo run -p teamboard-api --bin teamboard-check-db
//! ```

use std::process::ExitCode;
use teamboard_api::config::Config;
use teamboard_shared::db::{
    migrations::get_migration_status,
    pool::{close_pool, create_lazy_pool, get_pool_stats, test_connection},
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teamboard_shared=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let pool = create_lazy_pool(&config.database.pool_config())?;

    let check = test_connection(&pool).await;
    if !check.ok {
        eprintln!("FAILED: {}", check.message);
        close_pool(pool).await;
        return Ok(ExitCode::FAILURE);
    }

    println!("OK: {}", check.message);

    match get_migration_status(&pool).await {
        Ok(status) => println!(
            "Migrations: {}/{} applied (latest: {}){}",
            status.applied_migrations,
            status.known_migrations,
            status
                .latest_version
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string()),
            if status.is_up_to_date { "" } else { ", pending migrations" }
        ),
        Err(e) => println!("Migrations: unknown ({})", e),
    }

    let stats = get_pool_stats(&pool);
    println!(
        "Pool: {} connections ({} idle)",
        stats.total_connections, stats.idle_connections
    );

    close_pool(pool).await;

    Ok(ExitCode::SUCCESS)
}
