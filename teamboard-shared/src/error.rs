//! Error types shared by the data layer
//!
//! The store enforces referential integrity physically (foreign keys, unique
//! constraints, check constraints). When one of those rejects a statement the
//! driver hands back an opaque `sqlx::Error`; [`IntegrityViolation::classify`]
//! turns it into something callers can map to a precise response.

use thiserror::Error;

/// SQLSTATE raised on unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE raised on foreign key violations
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE raised on check constraint violations
pub const CHECK_VIOLATION: &str = "23514";

/// A statement rejected by one of the store's integrity constraints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    /// A unique or primary key constraint already holds the value
    #[error("duplicate value violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },

    /// A foreign key points at a row that does not exist
    #[error("missing referenced row for constraint `{constraint}`")]
    MissingReference { constraint: String },

    /// A check constraint rejected the value
    #[error("value violates check constraint `{constraint}`")]
    CheckFailed { constraint: String },
}

impl IntegrityViolation {
    /// Builds a violation from a SQLSTATE code and constraint name
    ///
    /// Returns `None` for codes that are not integrity violations.
    pub fn from_code(code: &str, constraint: Option<&str>) -> Option<Self> {
        let constraint = constraint.unwrap_or_default().to_string();

        match code {
            UNIQUE_VIOLATION => Some(Self::Duplicate { constraint }),
            FOREIGN_KEY_VIOLATION => Some(Self::MissingReference { constraint }),
            CHECK_VIOLATION => Some(Self::CheckFailed { constraint }),
            _ => None,
        }
    }

    /// Classifies a sqlx error, if it came from an integrity constraint
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        let db_err = err.as_database_error()?;
        let code = db_err.code()?;
        Self::from_code(&code, db_err.constraint())
    }

    /// Name of the constraint that fired
    pub fn constraint(&self) -> &str {
        match self {
            Self::Duplicate { constraint }
            | Self::MissingReference { constraint }
            | Self::CheckFailed { constraint } => constraint,
        }
    }
}

/// Errors raised while bringing the database up
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to connect to the database: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
