use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthService};
use crate::model::{Credentials, Role, Session, UserProfile};
use crate::store::{CredentialStore, PROFILE_KEY, TOKEN_KEY};

/// Owns the in-memory session and persists changes to a store.
///
/// Single source of truth for "who is logged in": every mutation goes
/// through these methods so the token/profile co-clearing invariant is
/// enforced in one place. Shared by `Arc` with the navigation guard and
/// the UI layer.
pub struct SessionManager<S: CredentialStore> {
    session: Arc<Mutex<Session>>,
    store: Arc<S>,
    auth: Arc<dyn AuthService>,
}

impl<S: CredentialStore> SessionManager<S> {
    pub fn new(store: Arc<S>, auth: Arc<dyn AuthService>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::default())),
            store,
            auth,
        }
    }

    /// Hydrate the session from persisted state.
    ///
    /// Idempotent: re-reads storage and replaces the in-memory session, so
    /// repeated calls with unchanged storage land on the same state. A
    /// persisted profile that fails to parse, or one found without a
    /// token, is corruption: both in-memory and persisted state are
    /// cleared (equivalent to logout) and no error surfaces.
    pub async fn init(&self) -> anyhow::Result<()> {
        let token = self.store.get(TOKEN_KEY).await?.unwrap_or_default();
        let raw_profile = self.store.get(PROFILE_KEY).await?;

        let mut hydrated = Session {
            token,
            profile: None,
        };

        if let Some(raw) = raw_profile {
            match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) if hydrated.is_authenticated() => {
                    hydrated.profile = Some(profile);
                }
                Ok(_) => {
                    warn!("persisted profile found without a token, clearing session");
                    hydrated.clear();
                    self.erase_persisted().await?;
                }
                Err(e) => {
                    warn!(error = %e, "persisted profile failed to parse, clearing session");
                    hydrated.clear();
                    self.erase_persisted().await?;
                }
            }
        }

        let mut guard = self.session.lock().await;
        *guard = hydrated;

        Ok(())
    }

    /// Authenticate against the external service, then set and persist
    /// token and profile together.
    ///
    /// Rejected credentials propagate as `AuthError`; nothing is retried.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let response = self.auth.authenticate(credentials).await?;

        debug!(username = %response.user.username, role = %response.user.role, "login accepted");

        let raw_profile = serde_json::to_string(&response.user)
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let snapshot = {
            let mut guard = self.session.lock().await;
            guard.token = response.access_token;
            guard.profile = Some(response.user);
            guard.clone()
        };

        self.store.set(TOKEN_KEY, &snapshot.token).await?;
        self.store.set(PROFILE_KEY, &raw_profile).await?;

        Ok(snapshot)
    }

    /// Clear the session in memory and erase both persisted entries.
    ///
    /// Has no failure mode: storage errors during erase are logged and
    /// swallowed, the user is logged out either way.
    pub async fn logout(&self) {
        {
            let mut guard = self.session.lock().await;
            guard.clear();
        }

        if let Err(e) = self.store.remove(TOKEN_KEY).await {
            warn!(error = %e, "failed to erase persisted token");
        }
        if let Err(e) = self.store.remove(PROFILE_KEY).await {
            warn!(error = %e, "failed to erase persisted profile");
        }
    }

    /// Replace the profile after an out-of-band edit and re-persist it.
    /// The token is untouched.
    pub async fn update_profile(&self, profile: UserProfile) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&profile)?;

        {
            let mut guard = self.session.lock().await;
            if !guard.is_authenticated() {
                anyhow::bail!("no active session to update");
            }
            guard.profile = Some(profile);
        }

        self.store.set(PROFILE_KEY, &raw).await?;

        Ok(())
    }

    /// True iff the profile's role equals one of `roles`.
    pub async fn has_role(&self, roles: &[Role]) -> bool {
        self.session.lock().await.has_role(roles)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    pub async fn role(&self) -> Option<Role> {
        self.session.lock().await.role()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.session.lock().await.profile.clone()
    }

    /// Clone of the current session for pure checks.
    pub async fn snapshot(&self) -> Session {
        let guard = self.session.lock().await;

        debug_assert!(
            guard.profile.is_none() || guard.is_authenticated(),
            "profile must never outlive the token"
        );

        guard.clone()
    }

    async fn erase_persisted(&self) -> anyhow::Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(PROFILE_KEY).await?;
        Ok(())
    }
}
