//! Abstraction over the external authentication service.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Credentials, LoginResponse};

/// Errors surfaced by `SessionManager::login` and its collaborator.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authentication service unreachable: {0}")]
    Transport(String),

    #[error("malformed authentication response: {0}")]
    InvalidResponse(String),

    #[error("credential storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Verifies credentials against the backend.
///
/// Password handling lives entirely on the other side of this trait; the
/// session core only ever sees the resulting token and profile.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;
}
