/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login endpoint
/// - `users`: User accounts and role management
/// - `projects`: Projects owned by users
/// - `tasks`: Tasks within a project
/// - `comments`: Comments on a task

pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
