//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for everything the dashboard
//! shows. It owns the mount lifecycle: while mounted it holds a [`ViewStore`];
//! when unmounted the store is gone and nothing can be written to it.
//!
//! # Mount generations
//!
//! Every mount bumps `generation`, and every request is stamped with the
//! generation it was built under. A response is only applied when the store
//! exists and its generation matches, so responses to requests issued before
//! an unmount are dropped.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns state into a renderable
//! [`UIViewModel`], windowing the table around the selection.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::api::VehicleApi;
//! use vehicle_dashboard::app::AppState;
//! use vehicle_dashboard::ui::Theme;
//!
//! let mut state = AppState::new(VehicleApi::new("http://localhost:5000"), Theme::default());
//! let request = state.mount();
//! assert_eq!(request.url, "http://localhost:5000/api/vehicles");
//! let viewmodel = state.compute_viewmodel(24, 100, &[]);
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::modes::InputMode;
use super::store::ViewStore;
use crate::api::{ApiRequest, RequestContext, VehicleApi};
use crate::domain::{Vehicle, VehicleStatus};
use crate::notify::Toast;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, FormInfo, HeaderInfo, ToastLine, UIViewModel,
};

/// Title shown in the header bar.
const DASHBOARD_TITLE: &str = "Vehicle Management Dashboard";

/// Rows taken by everything except table rows and toasts: blank line, header,
/// border, form box (3), filter bar, column headers, border, footer, and the
/// untouched last line.
const CHROME_ROWS: usize = 11;

/// Maximum number of toasts shown at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Local view state; `None` while unmounted.
    pub store: Option<ViewStore>,

    /// Current mount generation. Starts at 0 and is bumped by every mount.
    pub generation: u64,

    /// Counter used to number outgoing requests.
    next_request_id: u64,

    /// Requests sent under the current generation that have not resolved.
    pub in_flight: usize,

    /// Zero-based index of the selected row within the filtered list.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Request builder for the configured service origin.
    pub api: VehicleApi,
}

impl AppState {
    /// Creates an unmounted dashboard.
    #[must_use]
    pub fn new(api: VehicleApi, theme: Theme) -> Self {
        Self {
            store: None,
            generation: 0,
            next_request_id: 0,
            in_flight: 0,
            selected_index: 0,
            input_mode: InputMode::Browse,
            theme,
            api,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    /// Creates a fresh store under a new generation and returns the initial
    /// list request.
    pub fn mount(&mut self) -> ApiRequest {
        self.generation += 1;
        self.store = Some(ViewStore::new());
        self.selected_index = 0;
        self.input_mode = InputMode::Browse;
        self.in_flight = 0;
        tracing::debug!(generation = self.generation, "dashboard mounted");
        self.list_request()
    }

    /// Drops the store. Responses still in flight will find nothing to update.
    pub fn unmount(&mut self) {
        if self.store.take().is_some() {
            tracing::debug!(
                generation = self.generation,
                abandoned_requests = self.in_flight,
                "dashboard unmounted"
            );
        }
        self.in_flight = 0;
    }

    /// Whether a response with this context may be applied.
    #[must_use]
    pub const fn accepts(&self, context: &RequestContext) -> bool {
        self.store.is_some() && context.generation == self.generation
    }

    fn take_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.in_flight += 1;
        self.next_request_id
    }

    /// Builds a list request under the current generation.
    pub fn list_request(&mut self) -> ApiRequest {
        let id = self.take_request_id();
        self.api.list_request(id, self.generation)
    }

    /// Builds a status update request under the current generation.
    pub fn update_status_request(&mut self, vehicle: &Vehicle, status: VehicleStatus) -> ApiRequest {
        let id = self.take_request_id();
        self.api.update_status_request(&vehicle.id, status, id, self.generation)
    }

    /// Builds a create request from the current draft.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Validation`](crate::domain::DashboardError::Validation)
    /// when the draft name is empty (or nothing is mounted); no request id is
    /// consumed in that case.
    pub fn create_request(&mut self) -> crate::domain::Result<ApiRequest> {
        let (name, status) = self
            .store
            .as_ref()
            .map(|s| (s.draft().name.clone(), s.draft().status))
            .unwrap_or_default();
        let request =
            self.api
                .create_request(&name, status, self.next_request_id + 1, self.generation)?;
        self.take_request_id();
        Ok(request)
    }

    /// Marks one request of the current generation as resolved.
    pub fn request_resolved(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Number of rows passing the active filter.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.store.as_ref().map_or(0, |s| s.filtered_vehicles().len())
    }

    /// Moves the selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            count - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the selection inside the filtered list after it changed.
    pub fn clamp_selection(&mut self) {
        let count = self.visible_count();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// The vehicle under the cursor, if any.
    #[must_use]
    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.store
            .as_ref()
            .and_then(|s| s.filtered_vehicles().get(self.selected_index).copied())
    }

    /// Computes a renderable view model for a `rows` x `cols` terminal.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Subtract chrome and visible toasts from the terminal height
    /// 2. Center the window on the selected row
    /// 3. Pull the window back when it would run past the end of the list
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize, toasts: &[Toast]) -> UIViewModel {
        let toasts: Vec<ToastLine> = toasts
            .iter()
            .rev()
            .take(MAX_VISIBLE_TOASTS)
            .rev()
            .map(|t| ToastLine {
                kind: t.kind,
                message: t.message.clone(),
            })
            .collect();

        let Some(store) = &self.store else {
            return UIViewModel {
                header: self.compute_header(0),
                form: None,
                filter_label: String::new(),
                display_items: vec![],
                selected_index: 0,
                empty_state: Some(EmptyState {
                    message: "Dashboard is not loaded.".to_string(),
                    subtitle: "Press r to reload".to_string(),
                }),
                toasts,
                footer: self.compute_footer(),
            };
        };

        let filtered = store.filtered_vehicles();
        let available_rows = Self::calculate_available_rows(rows, toasts.len());

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(filtered.len());
        visible_start = visible_start.min(visible_end);

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && filtered.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items: Vec<DisplayItem> = filtered[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, vehicle)| {
                Self::compute_display_item(
                    vehicle,
                    visible_start + relative_idx == self.selected_index,
                    cols,
                )
            })
            .collect();

        let empty_state = filtered.is_empty().then(|| EmptyState {
            message: "No vehicles found.".to_string(),
            subtitle: if store.vehicles().is_empty() {
                "Press n to add a vehicle".to_string()
            } else {
                format!("No vehicle is {}; press f to change the filter", store.filter().label())
            },
        });

        UIViewModel {
            header: self.compute_header(filtered.len()),
            form: Some(FormInfo {
                name: store.draft().name.clone(),
                status: store.draft().status,
                focused: self.input_mode == InputMode::Form,
            }),
            filter_label: store.filter().label().to_string(),
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state,
            toasts,
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(vehicle: &Vehicle, is_selected: bool, cols: usize) -> DisplayItem {
        const NAME_WIDTH: usize = 24;

        let name = if vehicle.name.chars().count() > NAME_WIDTH - 2 {
            let kept: String = vehicle.name.chars().take(NAME_WIDTH - 5).collect();
            format!("{kept}...")
        } else {
            vehicle.name.clone()
        };

        let actions = if is_selected {
            if cols >= 100 {
                "[a] Set Active  [i] Set Inactive  [m] Set Maintenance"
            } else {
                "[a] Active [i] Inactive [m] Maint."
            }
        } else {
            ""
        };

        DisplayItem {
            name,
            status: vehicle.status,
            last_updated: vehicle.last_updated_display(),
            actions: actions.to_string(),
            is_selected,
        }
    }

    fn compute_header(&self, count: usize) -> HeaderInfo {
        let title = if self.in_flight > 0 {
            format!(" {DASHBOARD_TITLE} ({count}) · loading ")
        } else {
            format!(" {DASHBOARD_TITLE} ({count}) ")
        };
        HeaderInfo {
            title,
            origin: self.api.base_url().to_string(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.is_mounted()) {
            (_, false) => "r: reload  q: quit",
            (InputMode::Browse, true) => {
                "j/k: navigate  a/i/m: set status  f/F: filter  n: new vehicle  r: reload  q: quit"
            }
            (InputMode::Form, true) => {
                "Type name  Tab/Shift+Tab: status  Enter: add  Esc: back"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the table after chrome and toasts. Always at least one.
    const fn calculate_available_rows(total_rows: usize, toast_count: usize) -> usize {
        let rows = total_rows.saturating_sub(CHROME_ROWS + toast_count);
        if rows == 0 {
            1
        } else {
            rows
        }
    }
}
