/// Project payloads
///
/// - `ProjectCreate`: body of `POST /projects`
/// - `ProjectUpdate`: body of `PUT /projects/:id`, every field optional
/// - `ProjectResponse`: a stored project
/// - `ProjectWithTasks`: a stored project with all of its tasks
/// - `ProjectMembers`: the users of a project

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::task::TaskResponse;
use super::user::UserResponse;
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::task::Task;
use crate::models::user::User;

/// Maximum project name length, in characters
pub const NAME_MAX_LEN: u64 = 100;

/// Maximum project description length, in characters
pub const DESCRIPTION_MAX_LEN: u64 = 500;

/// Request body for creating a project
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectCreate {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    pub name: String,

    #[validate(
        length(max = 500, message = "Description must be at most 500 characters"),
        does_not_contain(pattern = "\0", message = "Description must not contain NUL characters")
    )]
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating a project
///
/// Absent (or null) fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProjectUpdate {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        does_not_contain(pattern = "\0", message = "Name must not contain NUL characters")
    )]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(
        length(max = 500, message = "Description must be at most 500 characters"),
        does_not_contain(pattern = "\0", message = "Description must not contain NUL characters")
    )]
    #[serde(default)]
    pub description: Option<String>,
}

/// A stored project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// A stored project together with its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWithTasks {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,

    /// Tasks in store order (by ID)
    #[serde(default)]
    pub tasks: Vec<TaskResponse>,
}

/// Users taking part in a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembers {
    pub project_id: i32,
    pub project_name: String,
    pub users_count: usize,
    pub users: Vec<UserResponse>,
}

/// Confirmation returned when membership changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub message: String,
    pub project_id: i32,
    pub user_id: i32,
}

impl MembershipResponse {
    pub fn added(project_id: i32, user_id: i32) -> Self {
        Self {
            message: format!("User {} added to project {}", user_id, project_id),
            project_id,
            user_id,
        }
    }

    pub fn removed(project_id: i32, user_id: i32) -> Self {
        Self {
            message: format!("User {} removed from project {}", user_id, project_id),
            project_id,
            user_id,
        }
    }
}

impl From<ProjectCreate> for CreateProject {
    fn from(payload: ProjectCreate) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
        }
    }
}

impl From<ProjectUpdate> for UpdateProject {
    fn from(payload: ProjectUpdate) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
        }
    }
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
        }
    }
}

impl ProjectWithTasks {
    pub fn new(project: Project, tasks: Vec<Task>) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

impl ProjectMembers {
    pub fn new(project: Project, users: Vec<User>) -> Self {
        Self {
            project_id: project.id,
            project_name: project.name,
            users_count: users.len(),
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}
