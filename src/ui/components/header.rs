//! Header component renderer.
//!
//! Renders the title bar with the vehicle count centered and the service
//! origin right-aligned when the terminal is wide enough.

use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next row.
///
/// ```text
/// [left padding] TITLE [right padding] origin
/// ```
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = text_width(&title);
    let padding = (cols.saturating_sub(title_len)) / 2;
    let origin_len = text_width(&header.origin) + 1;
    let show_origin = padding + title_len + origin_len + 2 <= cols;

    frame.position_cursor(row, 1);
    frame.put(Theme::bold());
    frame.put(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        frame.put(&Theme::bg(bg));
    }

    frame.pad(padding);
    frame.put(&title);

    if show_origin {
        frame.pad(cols - padding - title_len - origin_len);
        frame.put(Theme::reset());
        frame.put(&Theme::fg(&theme.colors.text_dim));
        if let Some(bg) = &theme.colors.header_bg {
            frame.put(&Theme::bg(bg));
        }
        frame.put(&header.origin);
        frame.pad(1);
    } else {
        frame.pad(cols.saturating_sub(padding + title_len));
    }

    frame.put(Theme::reset());
    row + 1
}
