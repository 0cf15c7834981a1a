/// Query parameters for list endpoints
///
/// ```text
/// GET /projects/?skip=20&limit=10
/// GET /tasks?project_id=3
/// ```

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::models::task::TaskFilter;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// `skip`/`limit` pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// Rows to skip
    #[validate(range(min = 0, message = "skip must not be negative"))]
    #[serde(default)]
    pub skip: i64,

    /// Maximum rows to return
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query of `GET /tasks`
///
/// `project_id` absent and `project_id=` (empty) both mean "all projects".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TaskListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub project_id: Option<i32>,

    #[validate(range(min = 0, message = "skip must not be negative"))]
    #[serde(default)]
    pub skip: i64,

    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl TaskListQuery {
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            project_id: self.project_id,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            skip: self.skip,
            limit: self.limit,
        }
    }
}

/// Treats an empty query value as absent
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
