//! "Add New Vehicle" form and filter bar renderers.

use crate::domain::VehicleStatus;
use crate::ui::helpers::{text_width, truncate, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FormInfo;

/// Horizontal margin for the form box (spaces on left and right).
const FORM_BOX_MARGIN: usize = 2;

const FORM_TITLE: &str = " Add New Vehicle ";

/// Renders the 3-line form box at `row` and returns the row after it.
///
/// ```text
/// [margin] ┌ Add New Vehicle ───────────────────────┐ [margin]
/// [margin] │ Name: Truck1▏  Status: ‹ Active ›  [Add] │ [margin]
/// [margin] └────────────────────────────────────────┘ [margin]
/// ```
///
/// The frame switches to `form_focus_border` and the name field shows a
/// cursor while the form has keyboard focus.
pub fn render_form(frame: &mut Frame, row: usize, form: &FormInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(FORM_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if form.focused {
        &theme.colors.form_focus_border
    } else {
        &theme.colors.form_border
    };

    frame.position_cursor(row, 1);
    frame.pad(FORM_BOX_MARGIN);
    frame.put(&Theme::fg(border));
    let title = truncate(FORM_TITLE, inner_width);
    frame.put("┌");
    frame.put(Theme::bold());
    frame.put(&title);
    frame.put(Theme::reset());
    frame.put(&Theme::fg(border));
    frame.put(&"─".repeat(inner_width.saturating_sub(text_width(&title))));
    frame.put("┐");
    frame.put(Theme::reset());

    let cursor = if form.focused { "▏" } else { "" };
    let name_text = format!(" Name: {}{cursor}", form.name);
    let status_text = format!("  Status: ‹ {} ›", form.status);
    let submit_text = if form.focused { "  [Enter] Add " } else { "  [n] Edit " };
    let used = text_width(&name_text) + text_width(&status_text) + text_width(submit_text);

    frame.position_cursor(row + 1, 1);
    frame.pad(FORM_BOX_MARGIN);
    frame.put(&Theme::fg(border));
    frame.put("│");
    if used <= inner_width {
        frame.put(&Theme::fg(&theme.colors.text_normal));
        frame.put(&name_text);
        frame.put(&Theme::fg(&theme.colors.text_dim));
        frame.put("  Status: ");
        frame.put(&Theme::fg(theme.colors.status(form.status)));
        frame.put(&format!("‹ {} ›", form.status));
        frame.put(&Theme::fg(&theme.colors.text_dim));
        frame.pad(inner_width - used);
        frame.put(submit_text);
    } else {
        let compact = truncate(&format!("{name_text} [{}]", form.status), inner_width);
        frame.put(&Theme::fg(&theme.colors.text_normal));
        frame.put(&compact);
        frame.pad(inner_width.saturating_sub(text_width(&compact)));
    }
    frame.put(&Theme::fg(border));
    frame.put("│");
    frame.put(Theme::reset());

    frame.position_cursor(row + 2, 1);
    frame.pad(FORM_BOX_MARGIN);
    frame.put(&Theme::fg(border));
    frame.put(&format!("└{}┘", "─".repeat(inner_width)));
    frame.put(Theme::reset());

    row + 3
}

/// Renders the filter selector line and returns the next row.
///
/// The active filter is highlighted among the four choices. Chips that do
/// not fit in `cols` are cut or left out.
pub fn render_filter_bar(frame: &mut Frame, row: usize, active: &str, theme: &Theme, cols: usize) -> usize {
    let lead = truncate(&format!("{:FORM_BOX_MARGIN$}Filter:", ""), cols);
    let mut used = text_width(&lead);

    frame.position_cursor(row, 1);
    frame.put(&Theme::fg(&theme.colors.text_dim));
    frame.put(&lead);

    let choices = std::iter::once("All").chain(VehicleStatus::ALL.iter().map(|s| s.as_str()));
    for label in choices {
        let room = cols.saturating_sub(used + 1);
        if room == 0 {
            break;
        }
        let chip = truncate(&format!(" {label} "), room);
        frame.put(" ");
        if label == active {
            frame.put(&Theme::fg(&theme.colors.selection_fg));
            frame.put(&Theme::bg(&theme.colors.selection_bg));
            frame.put(&chip);
            frame.put(Theme::reset());
            frame.put(&Theme::fg(&theme.colors.text_dim));
        } else {
            frame.put(&chip);
        }
        used += 1 + text_width(&chip);
    }

    frame.pad(cols.saturating_sub(used));
    frame.put(Theme::reset());
    row + 1
}
