//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Output is returned as a string of ANSI sequences that overwrite the
//! previous frame in place; the runtime writes it.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::api::VehicleApi;
//! use vehicle_dashboard::app::AppState;
//! use vehicle_dashboard::ui::{render, Theme};
//!
//! let mut state = AppState::new(VehicleApi::new("http://localhost:5000"), Theme::default());
//! state.mount();
//! let screen = render(&state, &[], 24, 100);
//! assert!(screen.contains("No vehicles found."));
//! ```

use crate::app::AppState;
use crate::notify::Toast;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the dashboard for a `rows` x `cols` terminal.
#[must_use]
pub fn render(state: &AppState, toasts: &[Toast], rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols, toasts);
    let mut frame = Frame::new();
    components::render_dashboard(&mut frame, &viewmodel, &state.theme, cols, rows);
    frame.finish()
}
