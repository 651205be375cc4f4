//! Course module navigation and the role-filtered main menu.

mod course;
pub use course::{CourseModule, CourseNavigation, ModuleKind, ModuleSeed, ModuleStatus};

mod main_nav;
pub use main_nav::{MenuEntry, NAVIGATION_ITEMS, NavItem, items_for};
