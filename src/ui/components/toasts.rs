//! Notification area renderer.

use crate::notify::ToastKind;
use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastLine;

/// Renders toasts bottom-up so the newest sits at `last_row`.
pub fn render_toasts(frame: &mut Frame, last_row: usize, toasts: &[ToastLine], theme: &Theme, cols: usize) {
    let first_row = (last_row + 1).saturating_sub(toasts.len());
    for (offset, toast) in toasts.iter().enumerate() {
        let marker = match toast.kind {
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        };
        let text = truncate(&format!(" {marker} {} ", toast.message), cols.saturating_sub(2));

        frame.position_cursor(first_row + offset, 1);
        frame.pad(2);
        frame.put(Theme::bold());
        frame.put(&Theme::fg(theme.colors.toast(toast.kind)));
        frame.put(&text);
        frame.put(Theme::reset());
        frame.pad(cols.saturating_sub(2 + text_width(&text)));
    }
}
