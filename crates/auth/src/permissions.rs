//! Permission registry.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use opsdesk_core::DomainError;

/// Atomic capability identifier.
///
/// The registry is a closed set fixed at compile time; the snake_case string
/// form (e.g. `"view_orders"`) is the wire/persistence representation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,

    ViewProducts,
    CreateProduct,
    EditProduct,
    DeleteProduct,

    ViewOrders,
    ProcessOrder,
    CancelOrder,
    RefundOrder,

    ViewInventory,
    ManageInventory,
    AdjustInventory,

    ViewSupply,
    CreateSupplyOrder,
    ApproveSupplyOrder,

    ViewAnalytics,
    ExportReports,

    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,

    ViewSettings,
    ChangeSettings,
}

impl Permission {
    /// The full permission registry.
    pub const ALL: [Permission; 23] = [
        Permission::ViewDashboard,
        Permission::ViewProducts,
        Permission::CreateProduct,
        Permission::EditProduct,
        Permission::DeleteProduct,
        Permission::ViewOrders,
        Permission::ProcessOrder,
        Permission::CancelOrder,
        Permission::RefundOrder,
        Permission::ViewInventory,
        Permission::ManageInventory,
        Permission::AdjustInventory,
        Permission::ViewSupply,
        Permission::CreateSupplyOrder,
        Permission::ApproveSupplyOrder,
        Permission::ViewAnalytics,
        Permission::ExportReports,
        Permission::ViewUsers,
        Permission::CreateUser,
        Permission::EditUser,
        Permission::DeleteUser,
        Permission::ViewSettings,
        Permission::ChangeSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewProducts => "view_products",
            Permission::CreateProduct => "create_product",
            Permission::EditProduct => "edit_product",
            Permission::DeleteProduct => "delete_product",
            Permission::ViewOrders => "view_orders",
            Permission::ProcessOrder => "process_order",
            Permission::CancelOrder => "cancel_order",
            Permission::RefundOrder => "refund_order",
            Permission::ViewInventory => "view_inventory",
            Permission::ManageInventory => "manage_inventory",
            Permission::AdjustInventory => "adjust_inventory",
            Permission::ViewSupply => "view_supply",
            Permission::CreateSupplyOrder => "create_supply_order",
            Permission::ApproveSupplyOrder => "approve_supply_order",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ExportReports => "export_reports",
            Permission::ViewUsers => "view_users",
            Permission::CreateUser => "create_user",
            Permission::EditUser => "edit_user",
            Permission::DeleteUser => "delete_user",
            Permission::ViewSettings => "view_settings",
            Permission::ChangeSettings => "change_settings",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DomainError::invalid_id(format!("unknown permission '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn registry_identifiers_are_unique() {
        let names: HashSet<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names.len(), Permission::ALL.len());
    }

    #[test]
    fn wire_form_matches_display() {
        for p in Permission::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{p}\""));
        }
    }

    #[test]
    fn parse_round_trips_every_permission() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
    }

    #[test]
    fn parse_rejects_unknown_identifier() {
        let err = "launch_missiles".parse::<Permission>().unwrap_err();
        assert!(err.to_string().contains("launch_missiles"));
    }
}
