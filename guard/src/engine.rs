//! The navigation guard engine.
//!
//! For each navigation attempt it:
//!   1. Hydrates the session store (cheap, idempotent).
//!   2. Runs the pure access check from `decision` against a snapshot.
//!   3. Hands the outcome back to the routing layer.

use tracing::{Instrument, debug};

use common::logger::{TraceId, navigation_span};
use session::store::CredentialStore;

use crate::decision::{Access, Decision, check_route_access};
use crate::types::{RouteDescriptor, SharedSessionManager};

pub struct NavigationGuard<S: CredentialStore> {
    sessions: SharedSessionManager<S>,
}

impl<S: CredentialStore> NavigationGuard<S> {
    pub fn new(sessions: SharedSessionManager<S>) -> Self {
        Self { sessions }
    }

    /// Evaluate one navigation attempt, reporting the outcome with its
    /// reason so the caller can pick a user-facing message.
    ///
    /// Hydration runs first on every attempt: the check never sees stale
    /// or uninitialized state, whatever order the app wired things up in.
    /// Storage failures propagate; denials are ordinary outcomes.
    pub async fn evaluate(
        &self,
        dest: &RouteDescriptor,
        current_path: &str,
    ) -> anyhow::Result<Access> {
        let trace_id = TraceId::default();
        let span = navigation_span(&trace_id);

        async {
            self.sessions.init().await?;

            let session = self.sessions.snapshot().await;
            let access = check_route_access(&session, dest);

            debug!(
                from = current_path,
                to = %dest.path,
                authenticated = session.is_authenticated(),
                granted = access.is_granted(),
                "navigation evaluated"
            );

            Ok(access)
        }
        .instrument(span)
        .await
    }

    /// `evaluate` collapsed to the router-facing decision value.
    pub async fn authorize(
        &self,
        dest: &RouteDescriptor,
        current_path: &str,
    ) -> anyhow::Result<Decision> {
        Ok(self.evaluate(dest, current_path).await?.into_decision())
    }
}
