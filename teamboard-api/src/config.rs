/// Configuration management for the API server
///
/// This module loads configuration from environment variables (and a `.env`
/// file when present) into a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool ceiling (default: 10)
/// - `DATABASE_MIN_CONNECTIONS`: Connections kept warm (default: 1)
/// - `DATABASE_CONNECT_TIMEOUT`: Seconds to wait for a connection (default: 30)
/// - `RUN_MIGRATIONS`: Apply pending migrations on startup (default: true)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `LOG_FORMAT`: `text` or `json` (default: text)
/// - `RUST_LOG`: Log filter (default: debug for the teamboard crates)
///
/// # Example
///
/// ```no_run
/// use teamboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use teamboard_shared::db::pool;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Log output format
    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Minimum number of idle connections
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_seconds: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("LOG_FORMAT must be `text` or `json`, got `{}`", other),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - A variable is set to a value of the wrong type
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        Ok(Self {
            api: ApiConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("API_PORT", 8000)?,
                cors_origins: parse_origins(
                    &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 10)?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", 1)?,
                connect_timeout_seconds: parse_var("DATABASE_CONNECT_TIMEOUT", 30)?,
                run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            },
            log_format: parse_var("LOG_FORMAT", LogFormat::Text)?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl DatabaseConfig {
    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_seconds: self.connect_timeout_seconds,
            ..Default::default()
        }
    }
}

/// Reads `name`, falling back to `default` when unset or empty
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        _ => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}
