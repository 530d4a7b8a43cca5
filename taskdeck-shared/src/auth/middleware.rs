/// Bearer-token resolution for protected routes
///
/// This module implements the authorization guard: given a request's
/// `Authorization: Bearer <token>` header, validate the token and resolve the
/// subject (an email) to a concrete user. The API layer wraps
/// [`resolve_bearer`] in an axum middleware and injects the resulting
/// [`CurrentUser`] into request extensions.
///
/// Invalid tokens, expired tokens, and tokens whose subject no longer matches
/// a user all surface as [`AuthError::InvalidCredential`]; the API maps them
/// to one uniform 401 so callers cannot probe which accounts exist.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::CurrentUser;
///
/// async fn handler(Extension(current): Extension<CurrentUser>) -> String {
///     format!("Hello, user {}!", current.email)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use super::jwt::validate_token;
use crate::models::user::User;

/// Authenticated caller identity added to request extensions
///
/// Handlers extract it with axum's `Extension` extractor; it is only present
/// on routes behind the guard, so extraction cannot fail there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub user_id: i64,

    /// Authenticated user email (the token subject)
    pub email: String,
}

impl CurrentUser {
    /// Creates the request context from a resolved user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Error type for bearer resolution
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a Bearer token
    InvalidFormat(String),

    /// Token rejected, or its subject matches no user
    InvalidCredential(String),

    /// Database error during user lookup
    DatabaseError(String),
}

/// Resolves a request's bearer token to a [`CurrentUser`]
///
/// Steps:
/// 1. Extract the `Authorization` header and strip the `Bearer ` prefix
/// 2. Validate the JWT (signature, expiry, not-before, issuer)
/// 3. Look up the user whose email is the token subject
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] when the header is absent
/// - [`AuthError::InvalidFormat`] when the header is not a Bearer token
/// - [`AuthError::InvalidCredential`] when validation or the subject lookup
///   fails (the detail is logged, not returned to the client)
/// - [`AuthError::DatabaseError`] when the lookup query itself fails
pub async fn resolve_bearer(
    pool: &PgPool,
    secret: &str,
    headers: &HeaderMap,
) -> Result<CurrentUser, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| {
        debug!(error = %e, "bearer token rejected");
        AuthError::InvalidCredential(e.to_string())
    })?;

    let user = User::find_by_email(pool, &claims.sub)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("User lookup failed: {}", e)))?
        .ok_or_else(|| {
            debug!(subject = %claims.sub, "token subject matches no user");
            AuthError::InvalidCredential("unknown subject".to_string())
        })?;

    Ok(CurrentUser::from_user(&user))
}
