//! Composable UI component renderers.
//!
//! Each component draws one part of the dashboard into a [`Frame`] at an
//! explicit row and returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar with vehicle count and service origin
//! - [`form`]: "Add New Vehicle" box and filter selector
//! - [`table`]: Vehicle list (VEHICLE NAME, STATUS, LAST UPDATED, ACTIONS)
//! - [`empty`]: Empty state message
//! - [`toasts`]: Notification area above the footer
//! - [`footer`]: Keybinding hints

mod empty;
mod footer;
mod form;
mod header;
mod table;
mod toasts;

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use form::{render_filter_bar, render_form};
use header::render_header;
use table::{render_table_headers, render_table_rows};
use toasts::render_toasts;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) -> usize {
    frame.position_cursor(row, 1);
    frame.put(&Theme::fg(color));
    frame.put(&"─".repeat(cols));
    frame.put(Theme::reset());
    row + 1
}

/// Renders the full dashboard layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Form - 3 lines]
/// [Filter bar]
/// [Table Headers]
/// [Table Rows | Empty state]
/// [Blank padding]
/// [Toasts]
/// [Border]
/// [Footer]
/// ```
///
/// While unmounted only header, empty state, toasts and footer are drawn.
pub fn render_dashboard(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(frame, current_row, &vm.header, theme, cols);
    current_row = render_border(frame, current_row, &theme.colors.border, cols);

    if let Some(form) = &vm.form {
        current_row = render_form(frame, current_row, form, theme, cols);
        current_row = render_filter_bar(frame, current_row, &vm.filter_label, theme, cols);
        current_row = render_table_headers(frame, current_row, theme, cols);
        current_row = render_table_rows(frame, current_row, &vm.display_items, theme, cols);
    } else {
        current_row += 2;
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(frame, current_row, empty, theme, cols);
    }

    let footer_start = rows.saturating_sub(1).max(1);
    let border_row = footer_start.saturating_sub(1).max(1);

    if !vm.toasts.is_empty() {
        render_toasts(frame, border_row.saturating_sub(1), &vm.toasts, theme, cols);
    }
    render_border(frame, border_row, &theme.colors.border, cols);
    render_footer(frame, footer_start, &vm.footer, theme, cols);
}
