pub mod dashboard;
pub mod sidebar;

pub use dashboard::{DashboardActions, DashboardView};
pub use sidebar::{SidebarActions, SidebarView};
