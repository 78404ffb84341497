//! Session state machine.

use std::collections::HashSet;

use thiserror::Error;

use opsdesk_auth::{PagePolicy, Permission, page_policy};

use crate::store::{AUTH_TOKEN_KEY, CredentialStore, USER_KEY};
use crate::user::User;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The single mutable authentication/authorization state for the process.
///
/// # Invariants
/// - `authenticated` iff a current user is present.
/// - `permissions` is exactly the current user's role grant set when
///   authenticated, and empty otherwise; it is only ever derived from the
///   role, never set independently.
/// - Created with `loading = true`; `restore` is the only operation that
///   clears it, and it runs once at startup.
///
/// The session owns its credential store; callers inject one, which keeps
/// this container an explicit value rather than process-global state.
pub struct Session {
    store: Box<dyn CredentialStore>,
    authenticated: bool,
    loading: bool,
    current_user: Option<User>,
    permissions: HashSet<Permission>,
}

impl Session {
    /// Create a fresh, unrestored session over the given store.
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            store,
            authenticated: false,
            loading: true,
            current_user: None,
            permissions: HashSet::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutators
    // ─────────────────────────────────────────────────────────────────────

    /// Restore the session from the persisted credential record.
    ///
    /// Both keys must be present and the user record must parse; anything
    /// else (missing keys, malformed record, unreadable store) is treated
    /// as "no session". Always ends with `loading = false`.
    pub fn restore(&mut self) {
        match self.read_persisted_user() {
            Some(user) => {
                tracing::debug!(email = %user.email, role = %user.role, "session restored");
                self.become_authenticated(user);
            }
            None => {
                tracing::debug!("no persisted session");
                self.become_unauthenticated();
            }
        }
        self.loading = false;
    }

    /// Record the outcome of an external credential check.
    ///
    /// The store write is ordered before the in-memory flip; a failed write
    /// leaves the session state untouched. The token is recorded as-is,
    /// never validated here.
    pub fn login(&mut self, token: &str, user: User) -> Result<(), SessionError> {
        self.store.put(AUTH_TOKEN_KEY, token)?;
        let record = serde_json::to_string(&user)
            .map_err(|err| SessionError::Store(err.into()))?;
        self.store.put(USER_KEY, &record)?;

        tracing::info!(email = %user.email, role = %user.role, "logged in");
        self.become_authenticated(user);
        Ok(())
    }

    /// Remove the persisted credential record and clear the session.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(USER_KEY)?;

        tracing::info!("logged out");
        self.become_unauthenticated();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization reads (pure; never raise)
    // ─────────────────────────────────────────────────────────────────────

    /// True iff the session holds the permission. Always false while
    /// unauthenticated.
    pub fn has_permission(&self, permission: Permission) -> bool {
        if !self.authenticated {
            return false;
        }
        self.permissions.contains(&permission)
    }

    /// True iff the session may access the page at `path`.
    ///
    /// Pages without a policy entry are open to any authenticated session;
    /// pages with one need any single listed permission.
    pub fn can_access_page(&self, path: &str) -> bool {
        if !self.authenticated {
            return false;
        }
        match page_policy(path) {
            PagePolicy::Open => true,
            PagePolicy::AnyOf(required) => required.iter().any(|p| self.has_permission(*p)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn permissions(&self) -> &HashSet<Permission> {
        &self.permissions
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internal transitions
    // ─────────────────────────────────────────────────────────────────────

    fn become_authenticated(&mut self, user: User) {
        self.permissions = user.role.permissions().iter().copied().collect();
        self.current_user = Some(user);
        self.authenticated = true;
    }

    fn become_unauthenticated(&mut self) {
        self.permissions.clear();
        self.current_user = None;
        self.authenticated = false;
    }

    /// Read and parse the persisted record; any failure means "no session".
    fn read_persisted_user(&self) -> Option<User> {
        let token = match self.store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token?,
            Err(err) => {
                tracing::warn!("failed to read persisted token, treating as no session: {err:?}");
                return None;
            }
        };
        if token.is_empty() {
            return None;
        }

        let record = match self.store.get(USER_KEY) {
            Ok(record) => record?,
            Err(err) => {
                tracing::warn!("failed to read persisted user, treating as no session: {err:?}");
                return None;
            }
        };

        match serde_json::from_str(&record) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!("malformed persisted user record, treating as no session: {err}");
                None
            }
        }
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.authenticated)
            .field("loading", &self.loading)
            .field("current_user", &self.current_user)
            .field("permissions", &self.permissions)
            .finish_non_exhaustive()
    }
}
