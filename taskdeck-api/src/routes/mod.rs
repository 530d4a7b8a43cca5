/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Service metadata and health check endpoints
/// - `auth`: Authentication endpoints (register, login)
/// - `tasks`: Owner-scoped task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
