//! Decides whether the current session may reach a requested route,
//! and where to redirect otherwise.
//
//  This module is deliberately pure: no async, no IO.

use session::model::Session;

use crate::types::{LOGIN_PATH, RouteDescriptor, role_home};

/// Result of an access check, with the reason attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Destination needs a session and there is none.
    LoginRequired,
    /// The session's role is not allowed on this route.
    RoleDenied { home: &'static str },
    /// An authenticated session asked for the login page.
    AlreadyAuthenticated { home: &'static str },
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    pub fn into_decision(self) -> Decision {
        match self {
            Access::Granted => Decision::Proceed,
            Access::LoginRequired => Decision::RedirectTo(LOGIN_PATH.to_string()),
            Access::RoleDenied { home } => Decision::RedirectTo(home.to_string()),
            Access::AlreadyAuthenticated { home } => Decision::RedirectTo(home.to_string()),
        }
    }
}

/// What the routing layer should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    RedirectTo(String),
}

/// Check whether `session` may reach `route`.
///
/// This enforces, strictly in order (first match wins):
///   - authentication: routes require a session unless they opt out
///   - role membership, redirecting denials to the session's role home
///   - login-page redirect-away for sessions that are already in
pub fn check_route_access(session: &Session, route: &RouteDescriptor) -> Access {
    if route.requires_auth {
        if !session.is_authenticated() {
            return Access::LoginRequired;
        }

        if let Some(allowed) = &route.allowed_roles {
            if !session.has_role(allowed) {
                return Access::RoleDenied {
                    home: role_home(session.role()),
                };
            }
        }
    }

    if route.path == LOGIN_PATH && session.is_authenticated() {
        let home = role_home(session.role());

        // A session with no usable role homes to the login page already;
        // redirecting the login page to itself would loop.
        if home != LOGIN_PATH {
            return Access::AlreadyAuthenticated { home };
        }
    }

    Access::Granted
}
