/// Authentication utilities
///
/// This module provides the credential and session primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Bearer-token resolution and the per-request user context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with a fixed 30-minute default expiry
/// - **Constant-time Comparison**: Password verification is constant-time

pub mod jwt;
pub mod middleware;
pub mod password;
