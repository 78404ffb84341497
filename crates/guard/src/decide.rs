//! Route guard decision procedure.

use opsdesk_auth::Permission;
use opsdesk_session::Session;

/// One navigation attempt: the requested path plus the optional required
/// permission attached to the route's registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest<'a> {
    pub path: &'a str,
    pub required: Option<Permission>,
}

impl<'a> RouteRequest<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            required: None,
        }
    }

    pub fn requiring(path: &'a str, permission: Permission) -> Self {
        Self {
            path,
            required: Some(permission),
        }
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still restoring; render a waiting indicator and
    /// re-evaluate once it settles.
    Loading,
    /// Redirect to the login entry point, remembering the requested path so
    /// the caller can return there after a successful login.
    RedirectToLogin { return_to: String },
    /// Authenticated but not permitted; redirect to the access-denied page.
    RedirectToUnauthorized,
    /// Render the requested content.
    Render,
}

/// Decide a single navigation attempt.
///
/// Evaluated fresh on every call: session state or target path may have
/// changed since the last evaluation, so outcomes are never cached.
pub fn decide(session: &Session, request: &RouteRequest<'_>) -> RouteDecision {
    if session.is_loading() {
        tracing::debug!(path = request.path, "session restoring, holding navigation");
        return RouteDecision::Loading;
    }

    if !session.is_authenticated() {
        tracing::debug!(path = request.path, "unauthenticated, redirecting to login");
        return RouteDecision::RedirectToLogin {
            return_to: request.path.to_string(),
        };
    }

    if let Some(required) = request.required {
        if !session.has_permission(required) {
            tracing::debug!(
                path = request.path,
                required = %required,
                "missing route permission, redirecting to unauthorized"
            );
            return RouteDecision::RedirectToUnauthorized;
        }
    }

    if !session.can_access_page(request.path) {
        tracing::debug!(path = request.path, "page policy denied, redirecting to unauthorized");
        return RouteDecision::RedirectToUnauthorized;
    }

    tracing::debug!(path = request.path, "access granted");
    RouteDecision::Render
}
