//! Static route registration table.

use opsdesk_auth::Permission;
use opsdesk_session::Session;

use crate::decide::{RouteDecision, RouteRequest, decide};

/// Login entry point (public).
pub const LOGIN_PATH: &str = "/login";

/// Access-denied page (public).
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Dashboard; also the catch-all redirect target.
pub const HOME_PATH: &str = "/";

/// One registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    /// Permission attached to the registration; `None` for public routes.
    pub required: Option<Permission>,
    /// Public routes bypass the guard entirely.
    pub public: bool,
}

/// The application's route registrations.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: LOGIN_PATH,
        required: None,
        public: true,
    },
    RouteEntry {
        path: UNAUTHORIZED_PATH,
        required: None,
        public: true,
    },
    RouteEntry {
        path: HOME_PATH,
        required: Some(Permission::ViewDashboard),
        public: false,
    },
    RouteEntry {
        path: "/products",
        required: Some(Permission::ViewProducts),
        public: false,
    },
    RouteEntry {
        path: "/orders",
        required: Some(Permission::ViewOrders),
        public: false,
    },
    RouteEntry {
        path: "/inventory",
        required: Some(Permission::ViewInventory),
        public: false,
    },
    RouteEntry {
        path: "/supply",
        required: Some(Permission::ViewSupply),
        public: false,
    },
    RouteEntry {
        path: "/analytics",
        required: Some(Permission::ViewAnalytics),
        public: false,
    },
    RouteEntry {
        path: "/users",
        required: Some(Permission::ViewUsers),
        public: false,
    },
    RouteEntry {
        path: "/settings",
        required: Some(Permission::ViewSettings),
        public: false,
    },
];

/// Result of resolving a path against the registration table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The path is not registered; the router's catch-all sends the caller
    /// elsewhere (always the dashboard).
    Redirect { to: &'static str },
    /// The path is registered; the guard's decision applies.
    Decision(RouteDecision),
}

/// Look up a route registration.
pub fn route(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Resolve a navigation against the registration table.
///
/// Unregistered paths redirect to the dashboard (the router's catch-all);
/// public routes render unconditionally; everything else goes through the
/// guard with the registration's required permission.
pub fn navigate(session: &Session, path: &str) -> Navigation {
    let Some(entry) = route(path) else {
        tracing::debug!(path, "unregistered path, redirecting home");
        return Navigation::Redirect { to: HOME_PATH };
    };

    if entry.public {
        return Navigation::Decision(RouteDecision::Render);
    }

    Navigation::Decision(decide(
        session,
        &RouteRequest {
            path: entry.path,
            required: entry.required,
        },
    ))
}
