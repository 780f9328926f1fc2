//! SqliteCredentialStore
//! --------------------
//! This module provides a **SQLite-backed implementation** of the
//! `CredentialStore` trait used by the session::manager subsystem. It is
//! responsible for durable persistence of the access token and the
//! serialized user profile so that:
//!
//!  - a page reload / process restart does not force re-login
//!  - logout actually erases the persisted credentials
//!  - the manager operates purely in-memory between hydrations
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::CredentialStore;

/// SQLite-based persistence backend for credentials.
///
/// One `credentials(key, value)` table; `set()` has upsert semantics.
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite-backed store and ensure schema exists.
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let pool = SqlitePool::connect(path).await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        Ok(store)
    }

    /// Creates the credentials table if it does not exist.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM credentials WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Store or replace a value.
    ///
    /// `set()` uses INSERT OR UPDATE semantics:
    /// - New key → inserted
    /// - Existing key → value replaced
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value;
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM credentials WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
