//! Persisted user identity record.

use serde::{Deserialize, Serialize};

use opsdesk_auth::Role;
use opsdesk_core::UserId;

/// Identity attributes recorded by the external login step.
///
/// A `User` exists only as part of a `Session`; there is no user lifecycle
/// in this layer. The JSON form of this struct is the persisted `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}
