//! GUI module - dashboard interface components

pub mod app;
pub mod sidebar;
pub mod views;

pub use app::DashboardApp;
pub use sidebar::{Sidebar, SidebarAction};
