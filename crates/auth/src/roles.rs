//! Role catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use opsdesk_core::DomainError;

use crate::Permission;

/// Role identifier used for RBAC.
///
/// The catalog is a closed set; each role grants a fixed permission set,
/// defined at startup and read-only thereafter.
///
/// # Invariants
/// - `Role::Admin.permissions()` is the entire registry, so every other
///   role's grant set is a subset of admin's.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Operator,
    Viewer,
}

const MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewProducts,
    Permission::CreateProduct,
    Permission::EditProduct,
    Permission::ViewOrders,
    Permission::ProcessOrder,
    Permission::CancelOrder,
    Permission::ViewInventory,
    Permission::ManageInventory,
    Permission::AdjustInventory,
    Permission::ViewSupply,
    Permission::CreateSupplyOrder,
    Permission::ViewAnalytics,
    Permission::ExportReports,
    Permission::ViewUsers,
    Permission::ViewSettings,
    Permission::ChangeSettings,
];

const OPERATOR_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewProducts,
    Permission::EditProduct,
    Permission::ViewOrders,
    Permission::ProcessOrder,
    Permission::ViewInventory,
    Permission::ManageInventory,
    Permission::ViewSupply,
    Permission::CreateSupplyOrder,
    Permission::ViewAnalytics,
];

const VIEWER_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewProducts,
    Permission::ViewOrders,
    Permission::ViewInventory,
    Permission::ViewSupply,
    Permission::ViewAnalytics,
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Operator, Role::Viewer];

    /// Permission set granted by this role.
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => &Permission::ALL,
            Role::Manager => MANAGER_PERMISSIONS,
            Role::Operator => OPERATOR_PERMISSIONS,
            Role::Viewer => VIEWER_PERMISSIONS,
        }
    }

    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Operator => "operator",
            Role::Viewer => "viewer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::invalid_id(format!("unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn admin_grants_the_entire_registry() {
        assert_eq!(Role::Admin.permissions(), &Permission::ALL);
    }

    #[test]
    fn admin_grant_set_is_superset_of_every_role() {
        let admin: HashSet<Permission> = Role::Admin.permissions().iter().copied().collect();
        for role in Role::ALL {
            for p in role.permissions() {
                assert!(admin.contains(p), "admin lacks {p} granted to {role}");
            }
        }
    }

    #[test]
    fn grant_sets_have_no_duplicates() {
        for role in Role::ALL {
            let unique: HashSet<Permission> = role.permissions().iter().copied().collect();
            assert_eq!(unique.len(), role.permissions().len(), "duplicate grant in {role}");
        }
    }

    #[test]
    fn viewer_is_read_only() {
        for p in Role::Viewer.permissions() {
            assert!(p.as_str().starts_with("view_"), "viewer granted {p}");
        }
    }

    #[test]
    fn operator_lacks_settings_and_user_admin() {
        assert!(!Role::Operator.grants(Permission::ViewSettings));
        assert!(!Role::Operator.grants(Permission::ViewUsers));
        assert!(!Role::Operator.grants(Permission::DeleteProduct));
    }

    #[test]
    fn manager_holds_settings_but_not_destructive_grants() {
        assert!(Role::Manager.grants(Permission::ViewSettings));
        assert!(Role::Manager.grants(Permission::ChangeSettings));
        assert!(!Role::Manager.grants(Permission::DeleteProduct));
        assert!(!Role::Manager.grants(Permission::RefundOrder));
        assert!(!Role::Manager.grants(Permission::ApproveSupplyOrder));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let back: Role = serde_json::from_str("\"operator\"").unwrap();
        assert_eq!(back, Role::Operator);
    }

    #[test]
    fn parse_rejects_unknown_role() {
        assert!("superuser".parse::<Role>().is_err());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        fn any_role() -> impl Strategy<Value = Role> {
            prop::sample::select(Role::ALL.to_vec())
        }

        fn any_permission() -> impl Strategy<Value = Permission> {
            prop::sample::select(Permission::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn admin_grants_whatever_any_role_grants(role in any_role(), p in any_permission()) {
                if role.grants(p) {
                    prop_assert!(Role::Admin.grants(p));
                }
            }

            #[test]
            fn grants_agrees_with_permission_slice(role in any_role(), p in any_permission()) {
                prop_assert_eq!(role.grants(p), role.permissions().contains(&p));
            }
        }
    }
}
