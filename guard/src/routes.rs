//! Route metadata for the attendance application.
//!
//! Flattened: child pages inherit the auth/role requirements of their
//! section, which is how the view layer declares them.

use session::model::Role;

use crate::types::{LOGIN_PATH, RouteDescriptor};

pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// The application's route table.
    ///
    /// Each role home admits its own role, so denial redirects always
    /// terminate (see `role_homes_admit_their_role`).
    pub fn attendance_app() -> Self {
        use Role::*;

        let mut routes = vec![RouteDescriptor::public(LOGIN_PATH)];

        for path in [
            "/admin",
            "/admin/users",
            "/admin/classrooms",
            "/admin/courses",
            "/admin/attendance",
            "/admin/reports",
        ] {
            routes.push(RouteDescriptor::restricted(path, &[Admin]));
        }

        for path in [
            "/teacher",
            "/teacher/sessions",
            "/teacher/records",
            "/teacher/live-signin",
        ] {
            routes.push(RouteDescriptor::restricted(path, &[Teacher, Admin]));
        }

        for path in ["/student", "/student/signin", "/student/history"] {
            routes.push(RouteDescriptor::restricted(path, &[Student, Teacher, Admin]));
        }

        Self::new(routes)
    }

    /// Descriptor for `path`.
    ///
    /// Unknown paths get the catch-all treatment: authentication required,
    /// no role restriction.
    pub fn resolve(&self, path: &str) -> RouteDescriptor {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .cloned()
            .unwrap_or_else(|| RouteDescriptor::new(path))
    }
}
