//! Page access policy.

use crate::Permission;

/// Required-permission policy for a page.
///
/// `Open` is deliberately a distinct variant rather than an empty list: a
/// path with no policy entry is accessible to any authenticated session
/// (fail-open), and that default must stay an explicit, testable branch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PagePolicy {
    /// No policy entry; any authenticated session may access the page.
    Open,
    /// Holding any one of the listed permissions satisfies access.
    AnyOf(&'static [Permission]),
}

/// Path → required-permissions table for the application's pages.
///
/// Any-of semantics: a session needs only one listed permission per page.
const PAGE_POLICIES: &[(&str, &[Permission])] = &[
    ("/", &[Permission::ViewDashboard]),
    ("/products", &[Permission::ViewProducts]),
    ("/orders", &[Permission::ViewOrders]),
    ("/inventory", &[Permission::ViewInventory]),
    ("/supply", &[Permission::ViewSupply]),
    ("/analytics", &[Permission::ViewAnalytics]),
    ("/users", &[Permission::ViewUsers]),
    ("/settings", &[Permission::ViewSettings]),
];

/// Look up the access policy for a path.
pub fn page_policy(path: &str) -> PagePolicy {
    PAGE_POLICIES
        .iter()
        .find(|(page, _)| *page == path)
        .map(|(_, required)| PagePolicy::AnyOf(required))
        .unwrap_or(PagePolicy::Open)
}

/// All paths with a policy entry.
pub fn permissioned_paths() -> impl Iterator<Item = &'static str> {
    PAGE_POLICIES.iter().map(|(page, _)| *page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_requires_its_view_permission() {
        for path in ["/", "/products", "/orders", "/inventory", "/supply", "/analytics", "/users", "/settings"] {
            match page_policy(path) {
                PagePolicy::AnyOf(required) => {
                    assert_eq!(required.len(), 1, "{path}");
                    assert!(required[0].as_str().starts_with("view_"), "{path}");
                }
                PagePolicy::Open => panic!("{path} should have a policy entry"),
            }
        }
    }

    #[test]
    fn unmapped_path_is_open() {
        assert_eq!(page_policy("/profile"), PagePolicy::Open);
        assert_eq!(page_policy(""), PagePolicy::Open);
    }

    #[test]
    fn settings_page_requires_view_settings() {
        assert_eq!(
            page_policy("/settings"),
            PagePolicy::AnyOf(&[Permission::ViewSettings])
        );
    }

    #[test]
    fn table_covers_eight_pages() {
        assert_eq!(permissioned_paths().count(), 8);
    }
}
