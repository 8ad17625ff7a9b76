//! Input mode state for the dashboard.
//!
//! The mode decides which keybindings are active and how typed characters are
//! interpreted:
//! - **Browse**: navigate the table, trigger status actions, cycle the filter
//! - **Form**: edit the "Add New Vehicle" draft

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Table navigation and per-row status actions.
    ///
    /// Available keybindings: j/k (navigate), a/i/m (set status), f/F (filter),
    /// n or Tab (focus form), r (reload), q (quit).
    #[default]
    Browse,

    /// Editing the creation draft.
    ///
    /// Characters go to the name field, Tab/Shift+Tab cycle the status,
    /// Enter submits and Esc returns to browsing with the draft kept.
    Form,
}
