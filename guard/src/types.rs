//! Shared types used by the navigation guard subsystem.

use std::sync::Arc;

use async_trait::async_trait;

use session::manager::SessionManager;
use session::model::Role;

/// Path of the login view; the only public page in the default table.
pub const LOGIN_PATH: &str = "/login";

/// Authorization metadata for one navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,

    /// Unauthenticated access is denied unless a route opts out.
    pub requires_auth: bool,

    /// Roles allowed on this route. Absent = any authenticated role.
    pub allowed_roles: Option<Vec<Role>>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: true,
            allowed_roles: None,
        }
    }

    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requires_auth: false,
            allowed_roles: None,
        }
    }

    pub fn restricted(path: impl Into<String>, roles: &[Role]) -> Self {
        Self {
            path: path.into(),
            requires_auth: true,
            allowed_roles: Some(roles.to_vec()),
        }
    }
}

/// Default landing route for a role.
///
/// Used after login and as the redirect target when access is denied.
/// Total: sessions without a usable role land on the login page.
pub fn role_home(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/admin",
        Some(Role::Teacher) => "/teacher",
        Some(Role::Student) => "/student",
        None => LOGIN_PATH,
    }
}

/// Abstraction over user-facing messages (toast UI, CLI, etc.).
///
/// The guard itself only returns a decision; the routing layer maps
/// denied outcomes onto these calls.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// An unauthenticated session was sent to the login page.
    async fn login_required(&self);

    /// An authenticated session lacked the required role.
    async fn insufficient_role(&self);
}

/// Trait alias for the SessionManager used by the guard.
pub type SharedSessionManager<S> = Arc<SessionManager<S>>;
