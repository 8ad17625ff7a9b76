//! Footer component renderer.
//!
//! This module renders the footer help bar with centered keybinding hints.

use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row` and returns the next row.
///
/// Help text wider than the terminal is truncated so the layout stays intact
/// on narrow terminals.
pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);

    let text_len = text_width(&help_text);
    let padding = (cols.saturating_sub(text_len)) / 2;

    frame.position_cursor(row, 1);
    frame.put(&Theme::fg(&theme.colors.text_dim));
    frame.pad(padding);
    frame.put(&help_text);
    frame.pad(cols.saturating_sub(padding + text_len));
    frame.put(Theme::reset());
    row + 1
}
