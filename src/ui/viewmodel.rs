//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: truncated names, formatted
//! timestamps, and the selection marker for the visible window.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::domain::VehicleStatus;
//! use vehicle_dashboard::ui::viewmodel::{DisplayItem, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " Vehicle Management Dashboard (1) ".to_string(),
//!         origin: "http://localhost:5000".to_string(),
//!     },
//!     form: None,
//!     filter_label: "All".to_string(),
//!     display_items: vec![DisplayItem {
//!         name: "Van".to_string(),
//!         status: VehicleStatus::Inactive,
//!         last_updated: "1/1/2024, 12:00:00 AM".to_string(),
//!         actions: String::new(),
//!         is_selected: true,
//!     }],
//!     selected_index: 0,
//!     empty_state: None,
//!     toasts: vec![],
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//! };
//! assert_eq!(vm.display_items.len(), 1);
//! ```

use crate::domain::VehicleStatus;
use crate::notify::ToastKind;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// "Add New Vehicle" form; `None` while unmounted.
    pub form: Option<FormInfo>,

    /// Label of the active status filter.
    pub filter_label: String,

    /// Table rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Shown in place of table rows when nothing passes the filter.
    pub empty_state: Option<EmptyState>,

    /// Newest notifications, oldest first.
    pub toasts: Vec<ToastLine>,

    /// Keybinding hints.
    pub footer: FooterInfo,
}

/// One vehicle row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// Vehicle name, truncated to the name column.
    pub name: String,

    pub status: VehicleStatus,

    /// Formatted `lastUpdated`.
    pub last_updated: String,

    /// Status action hints; only filled for the selected row.
    pub actions: String,

    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text including the vehicle count.
    pub title: String,

    /// Service origin the dashboard talks to.
    pub origin: String,
}

/// Draft form display information.
#[derive(Debug, Clone)]
pub struct FormInfo {
    pub name: String,
    pub status: VehicleStatus,
    /// Whether keystrokes currently go to the form.
    pub focused: bool,
}

/// A visible notification.
#[derive(Debug, Clone)]
pub struct ToastLine {
    pub kind: ToastKind,
    pub message: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "j/k: navigate  q: quit").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g., "No vehicles found.").
    pub message: String,

    /// Secondary hint.
    pub subtitle: String,
}
