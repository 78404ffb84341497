//! `opsdesk-session` — session state machine and credential persistence.
//!
//! This crate provides:
//! - The persisted credential record abstraction (`CredentialStore`)
//! - In-memory and file-backed store implementations
//! - The single mutable `Session` with restore/login/logout and the pure
//!   authorization reads (`has_permission`, `can_access_page`)

pub mod session;
pub mod store;
pub mod user;

pub use session::{Session, SessionError};
pub use store::{CredentialStore, FileStore, MemoryStore, AUTH_TOKEN_KEY, USER_KEY};
pub use user::User;
