/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (env-configured, migrations applied)
/// - Router construction with real application state
/// - Registration/login helpers producing unique per-test identities
/// - Request helpers driving the router through tower

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    created_emails: Vec<String>,
}

impl TestContext {
    /// Creates a new test context against the configured database
    ///
    /// Requires `DATABASE_URL` and `JWT_SECRET` in the environment (or a
    /// `.env` file), same as the server itself.
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        // Tolerate the create race when parallel tests hit a fresh server;
        // a real failure surfaces on connect below
        taskdeck_shared::db::migrations::ensure_database_exists(&config.database.url)
            .await
            .ok();

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            created_emails: Vec::new(),
        })
    }

    /// Returns an email address no other test run has used
    pub fn unique_email(prefix: &str) -> String {
        format!("{}-{}@example.com", prefix, Uuid::new_v4())
    }

    /// Sends a request to the router, returning status and parsed JSON body
    ///
    /// `bearer` adds an Authorization header; `body` is sent as JSON.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Registers a user via the API, tracking the email for cleanup
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
    ) -> (StatusCode, serde_json::Value) {
        self.created_emails.push(email.to_string());
        self.request(
            "POST",
            "/auth/register",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Logs in via the form-encoded login endpoint
    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "username={}&password={}",
                email, password
            )))
            .unwrap();

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    /// Registers a fresh user and returns (email, bearer token)
    pub async fn signup(&mut self, prefix: &str) -> anyhow::Result<(String, String)> {
        let email = Self::unique_email(prefix);
        let password = "pw123456";

        let (status, _) = self.register(&email, password).await;
        anyhow::ensure!(status == StatusCode::OK, "registration failed: {}", status);

        let (status, body) = self.login(&email, password).await;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {}", status);

        let token = body["access_token"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("login response missing access_token"))?
            .to_string();

        Ok((email, token))
    }

    /// Removes every user this context created (tasks cascade)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE email = ANY($1)")
            .bind(&self.created_emails)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
