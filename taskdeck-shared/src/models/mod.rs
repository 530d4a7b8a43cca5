/// Database models for Taskdeck
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts (registration identity and task ownership)
/// - `task`: Tasks owned by users

pub mod task;
pub mod user;
