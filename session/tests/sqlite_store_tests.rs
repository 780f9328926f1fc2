use sqlx::sqlite::SqlitePoolOptions;

use session::store::sqlite_store::SqliteCredentialStore;
use session::store::{CredentialStore, PROFILE_KEY, TOKEN_KEY};

///
/// Test suite for SqliteCredentialStore
///
/// This suite verifies:
///   · schema creation on construction
///   · get() on a missing key
///   · set() insert + upsert replace
///   · remove()
///   · independence of the two credential keys
///
/// An in-memory database is used; the pool is capped at one connection so
/// every query sees the same memory database.
///
async fn setup_store() -> SqliteCredentialStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let store = SqliteCredentialStore::from_pool(pool);
    store.ensure_schema().await.unwrap();
    store
}

#[tokio::test]
async fn missing_key_reads_as_none() -> anyhow::Result<()> {
    let store = setup_store().await;

    assert_eq!(store.get(TOKEN_KEY).await?, None);

    Ok(())
}

#[tokio::test]
async fn set_then_get_round_trips() -> anyhow::Result<()> {
    let store = setup_store().await;

    store.set(TOKEN_KEY, "tok-abc").await?;

    assert_eq!(store.get(TOKEN_KEY).await?.as_deref(), Some("tok-abc"));

    Ok(())
}

#[tokio::test]
async fn second_set_replaces_value() -> anyhow::Result<()> {
    let store = setup_store().await;

    store.set(TOKEN_KEY, "tok-old").await?;
    store.set(TOKEN_KEY, "tok-new").await?;

    assert_eq!(store.get(TOKEN_KEY).await?.as_deref(), Some("tok-new"));

    Ok(())
}

#[tokio::test]
async fn remove_erases_key() -> anyhow::Result<()> {
    let store = setup_store().await;

    store.set(PROFILE_KEY, "{}").await?;
    store.remove(PROFILE_KEY).await?;

    assert_eq!(store.get(PROFILE_KEY).await?, None);

    // Removing an absent key is fine
    store.remove(PROFILE_KEY).await?;

    Ok(())
}

#[tokio::test]
async fn token_and_profile_keys_are_independent() -> anyhow::Result<()> {
    let store = setup_store().await;

    store.set(TOKEN_KEY, "tok").await?;
    store.set(PROFILE_KEY, "{\"role\":\"admin\"}").await?;

    store.remove(TOKEN_KEY).await?;

    assert_eq!(store.get(TOKEN_KEY).await?, None);
    assert_eq!(
        store.get(PROFILE_KEY).await?.as_deref(),
        Some("{\"role\":\"admin\"}")
    );

    Ok(())
}
