/// Task payloads
///
/// `status` is restricted to the three `TaskStatus` variants by serde itself:
/// any other string fails deserialization before validation runs.
/// `due_date` uses the ISO calendar format `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use crate::models::task::TaskStatus;
use crate::models::task::{CreateTask, Task, UpdateTask};

/// Request body for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        does_not_contain(pattern = "\0", message = "Title must not contain NUL characters")
    )]
    pub title: String,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Must match the project in the URL
    #[validate(range(min = 1, message = "Project ID must be a positive integer"))]
    pub project_id: i32,
}

/// Request body for updating a task; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        does_not_contain(pattern = "\0", message = "Title must not contain NUL characters")
    )]
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// A stored task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub project_id: i32,
}

impl TaskCreate {
    /// Converts into a store insert for `project_id`
    pub fn into_new_task(self, project_id: i32) -> CreateTask {
        CreateTask {
            project_id,
            title: self.title,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

impl From<TaskUpdate> for UpdateTask {
    fn from(payload: TaskUpdate) -> Self {
        Self {
            title: payload.title,
            status: payload.status,
            due_date: payload.due_date,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            status: task.status,
            due_date: task.due_date,
            project_id: task.project_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::tests::invalid_fields;
    use serde_json::json;

    #[test]
    fn test_task_create_defaults() {
        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "T", "project_id": 1})).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.status, TaskStatus::Todo);
        assert!(payload.due_date.is_none());
    }

    #[test]
    fn test_task_create_parses_due_date() {
        let payload: TaskCreate = serde_json::from_value(json!({
            "title": "T",
            "status": "IN_PROGRESS",
            "due_date": "2026-02-20",
            "project_id": 1
        }))
        .unwrap();

        assert_eq!(payload.status, TaskStatus::InProgress);
        assert_eq!(payload.due_date, NaiveDate::from_ymd_opt(2026, 2, 20));
    }

    #[test]
    fn test_task_create_rejects_invalid_status() {
        let result = serde_json::from_value::<TaskCreate>(json!({
            "title": "T",
            "status": "INVALID",
            "project_id": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_create_rejects_impossible_date() {
        let result = serde_json::from_value::<TaskCreate>(json!({
            "title": "T",
            "due_date": "2026-02-30",
            "project_id": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_create_requires_project_id() {
        let result = serde_json::from_value::<TaskCreate>(json!({"title": "T"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_task_create_project_id_must_be_positive() {
        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "T", "project_id": 0})).unwrap();
        assert_eq!(invalid_fields(&payload), vec!["project_id"]);

        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "T", "project_id": -4})).unwrap();
        assert_eq!(invalid_fields(&payload), vec!["project_id"]);
    }

    #[test]
    fn test_task_create_title_bounds() {
        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "", "project_id": 1})).unwrap();
        assert_eq!(invalid_fields(&payload), vec!["title"]);

        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "t".repeat(200), "project_id": 1})).unwrap();
        assert!(payload.validate().is_ok());

        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "t".repeat(201), "project_id": 1})).unwrap();
        assert_eq!(invalid_fields(&payload), vec!["title"]);
    }

    #[test]
    fn test_task_title_rejects_nul_characters() {
        let payload: TaskUpdate =
            serde_json::from_value(json!({"title": "before\u{0}after"})).unwrap();
        assert_eq!(invalid_fields(&payload), vec!["title"]);
    }

    #[test]
    fn test_task_update_partial() {
        let payload: TaskUpdate = serde_json::from_value(json!({"status": "DONE"})).unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.title.is_none());
        assert_eq!(payload.status, Some(TaskStatus::Done));

        let update = UpdateTask::from(payload);
        assert!(update.due_date.is_none());
    }

    #[test]
    fn test_task_create_uses_url_project() {
        let payload: TaskCreate =
            serde_json::from_value(json!({"title": "T", "project_id": 3})).unwrap();
        let new_task = payload.into_new_task(3);
        assert_eq!(new_task.project_id, 3);
        assert_eq!(new_task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_task_response_field_order() {
        let task = Task {
            id: 1,
            project_id: 1,
            title: "T".to_string(),
            status: TaskStatus::Todo,
            due_date: None,
        };

        let body = serde_json::to_string(&TaskResponse::from(task)).unwrap();
        assert_eq!(
            body,
            r#"{"id":1,"title":"T","status":"TODO","due_date":null,"project_id":1}"#
        );
    }
}
