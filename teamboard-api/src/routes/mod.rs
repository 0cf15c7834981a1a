/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `root`: Service information
/// - `health`: Health check endpoint
/// - `projects`: Projects and their memberships
/// - `tasks`: Tasks, created under a project
/// - `users`: Users and their profiles

pub mod health;
pub mod projects;
pub mod root;
pub mod tasks;
pub mod users;
