/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness and health check endpoints
/// - `users`: Registration and login
/// - `projects`: Project creation and listing
/// - `tasks`: Task creation and listing
/// - `discussions`: Discussion threads and comments

pub mod discussions;
pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;
