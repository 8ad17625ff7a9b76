//! Table component renderer.
//!
//! Renders the vehicle list with Vehicle Name, Status, Last Updated and
//! Actions columns. Status labels are colored per status; the selected row
//! gets the selection background across the full width.

use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const NAME_WIDTH: usize = 24;
const STATUS_WIDTH: usize = 13;
const UPDATED_WIDTH: usize = 24;
const ROW_INDENT: usize = 2;

/// Renders the column headers at `row` and returns the next row.
pub fn render_table_headers(frame: &mut Frame, row: usize, theme: &Theme, cols: usize) -> usize {
    let line = format!(
        "{:ROW_INDENT$}{:<NAME_WIDTH$}{:<STATUS_WIDTH$}{:<UPDATED_WIDTH$}{}",
        "", "VEHICLE NAME", "STATUS", "LAST UPDATED", "ACTIONS"
    );
    let line = truncate(&line, cols);

    frame.position_cursor(row, 1);
    frame.put(Theme::bold());
    frame.put(&Theme::fg(&theme.colors.header_fg));
    frame.put(&line);
    frame.pad(cols.saturating_sub(text_width(&line)));
    frame.put(Theme::reset());
    row + 1
}

/// Renders all rows starting at `row` and returns the row after the last.
pub fn render_table_rows(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(frame, current_row, item, theme, cols);
    }
    current_row
}

/// Renders one vehicle row.
///
/// ```text
/// ▸ NAME (24)              STATUS (13)  LAST UPDATED (24)       [a] ... [m] ...
/// ```
///
/// The row is padded to the full terminal width so the selection background
/// covers it entirely, and every column is clipped at the right edge.
fn render_table_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    let marker = column(if item.is_selected { "▸" } else { "" }, ROW_INDENT, cols);
    let mut used = text_width(&marker);

    frame.position_cursor(row, 1);
    frame.put(&base);
    frame.put(&marker);

    let name = column(&item.name, NAME_WIDTH, cols.saturating_sub(used));
    used += text_width(&name);
    frame.put(&name);

    if !item.is_selected {
        frame.put(&Theme::fg(theme.colors.status(item.status)));
    }
    let status = column(item.status.as_str(), STATUS_WIDTH, cols.saturating_sub(used));
    used += text_width(&status);
    frame.put(&status);
    frame.put(&base);

    let updated = column(&item.last_updated, UPDATED_WIDTH, cols.saturating_sub(used));
    used += text_width(&updated);
    frame.put(&updated);

    let actions = truncate(&item.actions, cols.saturating_sub(used));
    frame.put(Theme::bold());
    frame.put(&actions);

    frame.pad(cols.saturating_sub(used + text_width(&actions)));
    frame.put(Theme::reset());
    row + 1
}

/// Left-aligns `text` in a column of `width`, clipped to the `room` left on
/// the line. Text wider than the column keeps its full length when it fits.
fn column(text: &str, width: usize, room: usize) -> String {
    let clipped = truncate(text, room);
    let width = width.min(room);
    format!("{clipped:<width$}")
}
