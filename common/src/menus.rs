//! Role-to-menu configuration for the console sidebar.

use crate::auth::Role;
use crate::auth::Role::{Accounts, Admin, Credit, Dealer, Operation, Rm, Sales};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLink {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Page(&'static str),
    Group(&'static [MenuLink]),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub label: &'static str,
    pub roles: &'static [Role],
    pub target: MenuTarget,
}

const fn link(label: &'static str, path: &'static str) -> MenuLink {
    MenuLink { label, path }
}

const EVERYONE: &[Role] = &[Admin, Rm, Credit, Operation, Sales, Accounts, Dealer];

pub const LEAD_CREATE: &str = "/leads/create";
pub const DEALER_ADD: &str = "/dealers/add";
pub const USER_CREATE: &str = "/create/users";
pub const DASHBOARD: &str = "/dashboard";

pub static MENUS: &[Menu] = &[
    Menu {
        label: "Dashboard",
        roles: EVERYONE,
        target: MenuTarget::Page(DASHBOARD),
    },
    Menu {
        label: "Masters",
        roles: &[Admin],
        target: MenuTarget::Group(&[
            link("Users", "/masters/users"),
            link("Create User", USER_CREATE),
            link("Roles & Permissions", "/masters/roles"),
            link("Departments", "/masters/departments"),
            link("Products", "/masters/products"),
        ]),
    },
    Menu {
        label: "Leads",
        roles: &[Admin, Rm, Sales, Dealer],
        target: MenuTarget::Group(&[link("Create Lead", LEAD_CREATE)]),
    },
    Menu {
        label: "Dealers",
        roles: &[Admin, Rm, Credit, Sales],
        target: MenuTarget::Group(&[
            link("Dealer List", "/dealers/list"),
            link("Onboard Dealer", DEALER_ADD),
            link("Dealer Verification", "/dealers/verification"),
        ]),
    },
    Menu {
        label: "Customers",
        roles: &[Admin, Rm, Credit, Dealer],
        target: MenuTarget::Group(&[
            link("Customer List", "/customers/list"),
            link("Add Customer", "/customers/add"),
            link("CIBIL Check", "/customers/cibil"),
        ]),
    },
    Menu {
        label: "Loans",
        roles: &[Admin, Credit, Operation, Rm, Dealer],
        target: MenuTarget::Group(&[
            link("Loan Applications", "/loans/list"),
            link("BRE & Approval", "/loans/bre"),
            link("Disbursement", "/loans/disbursement"),
        ]),
    },
    Menu {
        label: "Reports",
        roles: &[Admin, Accounts, Operation],
        target: MenuTarget::Group(&[
            link("Dealer Report", "/reports/dealer"),
            link("Customer Report", "/reports/customer"),
            link("Loan Report", "/reports/loan"),
            link("Collection Report", "/reports/collection"),
        ]),
    },
    Menu {
        label: "Settings",
        roles: &[Admin, Rm, Credit, Dealer, Operation],
        target: MenuTarget::Page("/settings"),
    },
    Menu {
        label: "Logout",
        roles: EVERYONE,
        target: MenuTarget::Logout,
    },
];

impl Menu {
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        let (page, links): (Option<&'static str>, &'static [MenuLink]) = match self.target {
            MenuTarget::Page(path) => (Some(path), &[]),
            MenuTarget::Group(links) => (None, links),
            MenuTarget::Logout => (None, &[]),
        };
        page.into_iter().chain(links.iter().map(|link| link.path))
    }
}

/// Menus the role may see, in table order.
pub fn visible_menus(role: Role) -> impl Iterator<Item = &'static Menu> {
    MENUS.iter().filter(move |menu| menu.roles.contains(&role))
}

/// Whether any menu visible to `role` leads to `path`.
pub fn allows(role: Role, path: &str) -> bool {
    visible_menus(role).any(|menu| menu.paths().any(|p| p == path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Role) -> Vec<&'static str> {
        visible_menus(role).map(|menu| menu.label).collect()
    }

    #[test]
    fn admin_sees_everything() {
        assert_eq!(labels(Admin).len(), MENUS.len());
    }

    #[test]
    fn accounts_sees_reports_only() {
        assert_eq!(labels(Accounts), vec!["Dashboard", "Reports", "Logout"]);
    }

    #[test]
    fn onboarding_pages_are_role_gated() {
        assert!(allows(Rm, DEALER_ADD));
        assert!(!allows(Dealer, DEALER_ADD));
        assert!(allows(Sales, LEAD_CREATE));
        assert!(!allows(Accounts, LEAD_CREATE));
        assert!(allows(Admin, USER_CREATE));
        assert!(!allows(Rm, USER_CREATE));
        assert!(!allows(Admin, "/nowhere"));
    }
}
