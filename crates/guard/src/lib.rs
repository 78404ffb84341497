//! `opsdesk-guard` — per-navigation route guarding.
//!
//! The guard composes session state and the static access policy into one
//! decision per navigation attempt. It never mutates the session and never
//! caches a decision.

pub mod decide;
pub mod routes;

pub use decide::{RouteDecision, RouteRequest, decide};
pub use routes::{
    HOME_PATH, LOGIN_PATH, Navigation, ROUTES, RouteEntry, UNAUTHORIZED_PATH, navigate, route,
};
