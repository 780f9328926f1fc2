//! HTTP client for the attendance backend.
//!
//! This is the concrete `AuthService` collaborator: it verifies
//! credentials against `POST /users/login`, and fetches the caller's
//! profile from `GET /users/me` for out-of-band refresh.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use session::auth::{AuthError, AuthService};
use session::model::{Credentials, LoginResponse, UserProfile};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch the caller's profile, e.g. after an out-of-band edit.
    ///
    /// The result feeds `SessionManager::update_profile`.
    #[instrument(skip(self, token), level = "debug")]
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, AuthError> {
        let url = format!("{}/users/me", self.base_url);

        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        match resp.status() {
            status if status.is_success() => resp
                .json::<UserProfile>()
                .await
                .map_err(|e| AuthError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidCredentials),
            status => Err(AuthError::Transport(format!("backend returned {status}"))),
        }
    }
}

#[async_trait]
impl AuthService for ApiClient {
    #[instrument(
        skip(self, credentials),
        fields(username = %credentials.username),
        level = "debug"
    )]
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/users/login", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        match resp.status() {
            status if status.is_success() => {
                let body = resp
                    .json::<LoginResponse>()
                    .await
                    .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

                debug!(role = %body.user.role, "credentials accepted");
                Ok(body)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidCredentials),
            status => Err(AuthError::Transport(format!(
                "authentication service returned {status}"
            ))),
        }
    }
}
