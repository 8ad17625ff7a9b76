//! Empty state component renderer.
//!
//! Rendered in place of the table rows when no vehicle passes the filter, or
//! across the body when the dashboard is not mounted.

use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message at `row` and returns the next row.
///
/// ```text
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
///
/// The message uses `empty_state_fg`; the subtitle is dimmed.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message = truncate(&empty.message, cols);
    let msg_len = text_width(&message);
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    frame.position_cursor(row, 1);
    frame.put(&Theme::fg(&theme.colors.empty_state_fg));
    frame.pad(msg_padding);
    frame.put(&message);
    frame.pad(cols.saturating_sub(msg_padding + msg_len));
    frame.put(Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = text_width(&subtitle);
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    frame.position_cursor(row + 1, 1);
    frame.put(Theme::dim());
    frame.put(&Theme::fg(&theme.colors.text_dim));
    frame.pad(sub_padding);
    frame.put(&subtitle);
    frame.pad(cols.saturating_sub(sub_padding + sub_len));
    frame.put(Theme::reset());

    row + 2
}
