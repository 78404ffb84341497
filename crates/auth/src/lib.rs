//! `opsdesk-auth` — static authorization catalogs.
//!
//! This crate is intentionally pure: permission registry, role catalog and
//! page access policy are fixed at compile time, with no I/O and no state.

pub mod permissions;
pub mod policy;
pub mod roles;

pub use permissions::Permission;
pub use policy::{PagePolicy, page_policy};
pub use roles::Role;
