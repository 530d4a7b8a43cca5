/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Authenticate and receive a bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Form, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, used as the login identifier
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Register response
///
/// The password hash is never part of any response.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: i64,

    /// Email address
    pub email: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Login request (form-encoded, OAuth2 password-flow field names)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "pw123456"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    // Friendly pre-check; the unique constraint still catches races
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "registered new user");

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a bearer token with the configured
/// lifetime (30 minutes by default). Unknown email and wrong password fail
/// with the same message and status.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=user%40example.com&password=pw123456
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "token_type": "bearer"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Incorrect email or password
pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let invalid_credentials =
        || ApiError::Unauthorized("Incorrect email or password".to_string());

    let user = User::find_by_email(&state.db, &req.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(invalid_credentials());
    }

    let claims = jwt::Claims::with_expiration(user.email.as_str(), state.config.token_ttl());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
