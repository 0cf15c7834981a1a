/// Request and response payloads
///
/// Shape checks (required fields, enum values, date format) happen during
/// deserialization; range and length checks are declared with `validator`
/// and run by calling `validate()` before anything touches the store.
///
/// - `project`: project create/update/response, project with tasks, members
/// - `task`: task create/update/response and the status enum
/// - `user`: user and profile payloads
/// - `pagination`: `skip`/`limit` and list filters

pub mod pagination;
pub mod project;
pub mod task;
pub mod user;

pub use pagination::{Pagination, TaskListQuery};
pub use project::{
    MembershipResponse, ProjectCreate, ProjectMembers, ProjectResponse, ProjectUpdate,
    ProjectWithTasks,
};
pub use task::{TaskCreate, TaskResponse, TaskStatus, TaskUpdate};
pub use user::{
    UserCreate, UserProfileCreate, UserProfileResponse, UserProfileUpdate, UserResponse,
    UserUpdate, UserWithProfile,
};
