//! Demo account directory.
//!
//! Local stand-in for the external credential-verification collaborator.
//! The session layer only records the outcome; real verification against an
//! identity provider is explicitly out of scope.

use uuid::Uuid;

use opsdesk_auth::Role;
use opsdesk_session::User;

const DEMO_PASSWORD: &str = "password";

const DEMO_ACCOUNTS: &[(&str, &str, Role)] = &[
    ("admin@example.com", "Admin", Role::Admin),
    ("manager@example.com", "Manager", Role::Manager),
    ("operator@example.com", "Operator", Role::Operator),
    ("viewer@example.com", "Viewer", Role::Viewer),
];

/// Verify demo credentials, returning the token and user to hand to
/// `Session::login`.
pub fn verify(email: &str, password: &str) -> Option<(String, User)> {
    if password != DEMO_PASSWORD {
        return None;
    }
    DEMO_ACCOUNTS
        .iter()
        .find(|(account, _, _)| *account == email)
        .map(|(account, name, role)| {
            let token = format!("demo-{}", Uuid::now_v7());
            (token, User::new(*name, *account, *role))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_accounts_cover_every_role() {
        let roles: Vec<Role> = DEMO_ACCOUNTS.iter().map(|(_, _, role)| *role).collect();
        for role in Role::ALL {
            assert!(roles.contains(&role), "no demo account for {role}");
        }
    }

    #[test]
    fn verify_accepts_demo_credentials() {
        let (token, user) = verify("operator@example.com", "password").unwrap();
        assert!(token.starts_with("demo-"));
        assert_eq!(user.role, Role::Operator);
        assert_eq!(user.email, "operator@example.com");
    }

    #[test]
    fn verify_rejects_wrong_password_and_unknown_account() {
        assert!(verify("admin@example.com", "hunter2").is_none());
        assert!(verify("nobody@example.com", "password").is_none());
    }
}
