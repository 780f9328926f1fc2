pub mod sqlite_store;

/// Persisted key for the opaque access token.
pub const TOKEN_KEY: &str = "access_token";

/// Persisted key for the JSON-serialized user profile.
pub const PROFILE_KEY: &str = "user_info";

/// Durable client-side key-value storage for credentials.
///
/// Only `SessionManager` reads or writes through this trait; the two keys
/// above are the whole contract.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
