use serde::{Deserialize, Serialize};

use crate::web::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub roles: &'static [UserRole],
}

impl NavItem {
    pub fn visible_to(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A menu entry as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MenuEntry {
    pub name: String,
    pub href: String,
    pub icon: String,
    pub description: String,
}

impl From<&NavItem> for MenuEntry {
    fn from(item: &NavItem) -> Self {
        Self {
            name: item.name.to_string(),
            href: item.href.to_string(),
            icon: item.icon.to_string(),
            description: item.description.to_string(),
        }
    }
}

const EVERYONE: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::User];
const STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

pub const NAVIGATION_ITEMS: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        href: "/dashboard",
        icon: "bar-chart-3",
        description: "Overview and analytics",
        roles: EVERYONE,
    },
    NavItem {
        name: "Courses",
        href: "/courses",
        icon: "book-open",
        description: "Safety training courses",
        roles: EVERYONE,
    },
    NavItem {
        name: "My Progress",
        href: "/progress",
        icon: "trending-up",
        description: "Track your learning progress",
        roles: &[UserRole::User],
    },
    NavItem {
        name: "Enrollments",
        href: "/enrollments",
        icon: "graduation-cap",
        description: "Manage course enrollments",
        roles: STAFF,
    },
    NavItem {
        name: "Users",
        href: "/users",
        icon: "users",
        description: "User management",
        roles: STAFF,
    },
    NavItem {
        name: "Plants",
        href: "/plants",
        icon: "building-2",
        description: "Facility management",
        roles: &[UserRole::Admin],
    },
    NavItem {
        name: "Reports",
        href: "/reports",
        icon: "file-text",
        description: "Compliance and analytics",
        roles: STAFF,
    },
    NavItem {
        name: "Settings",
        href: "/settings",
        icon: "settings",
        description: "System configuration",
        roles: &[UserRole::Admin],
    },
];

/// Menu entries for `role`, in display order.
pub fn items_for(role: UserRole) -> Vec<MenuEntry> {
    NAVIGATION_ITEMS
        .iter()
        .filter(|item| item.visible_to(role))
        .map(MenuEntry::from)
        .collect()
}
