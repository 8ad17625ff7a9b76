//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents: a `name` and a `[colors]` table of hex strings.
//! Built-in themes are compiled in; custom themes are read from disk.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! form_border = "#585b70"
//! form_focus_border = "#f5c2e7"
//! status_active = "#a6e3a1"
//! status_inactive = "#9399b2"
//! status_maintenance = "#fab387"
//! empty_state_fg = "#89b4fa"
//! toast_success = "#a6e3a1"
//! toast_error = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.starts_with("\u{1b}[1m"));
//! assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
//! # let _ = theme;
//! ```

use crate::domain::{DashboardError, Result, VehicleStatus};
use crate::notify::ToastKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Form frame while browsing.
    pub form_border: String,
    /// Form frame while the form has keyboard focus.
    pub form_focus_border: String,

    pub status_active: String,
    pub status_inactive: String,
    pub status_maintenance: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    pub toast_success: String,
    pub toast_error: String,
}

impl ThemeColors {
    /// Color for a status label.
    #[must_use]
    pub fn status(&self, status: VehicleStatus) -> &str {
        match status {
            VehicleStatus::Active => &self.status_active,
            VehicleStatus::Inactive => &self.status_inactive,
            VehicleStatus::Maintenance => &self.status_maintenance,
        }
    }

    /// Color for a toast.
    #[must_use]
    pub fn toast(&self, kind: ToastKind) -> &str {
        match kind {
            ToastKind::Success => &self.toast_success,
            ToastKind::Error => &self.toast_error,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Theme`] if the file cannot be read or its
    /// contents do not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DashboardError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            DashboardError::Theme(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Resolves the configured theme: a file wins over a name, and anything
    /// that fails to load falls back to the default theme.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&Path>) -> Self {
        if let Some(path) = file {
            match Self::from_file(path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(error = %e, "custom theme unavailable, using fallback"),
            }
        }

        if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme = name, "unknown theme name, using default");
        }

        Self::default()
    }

    /// Converts a hex color to an RGB tuple. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_conversion_handles_bad_input() {
        assert_eq!(Theme::hex_to_rgb("#a6e3a1"), (0xa6, 0xe3, 0xa1));
        assert_eq!(Theme::hex_to_rgb("a6e3a1"), (0xa6, 0xe3, 0xa1));
        assert_eq!(Theme::hex_to_rgb("#zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#fff"), (255, 255, 255));
        assert_eq!(Theme::bg("#000000"), "\u{1b}[48;2;0;0;0m");
    }

    #[test]
    fn status_colors_are_distinct() {
        let theme = Theme::default();
        let colors = &theme.colors;
        assert_ne!(colors.status(VehicleStatus::Active), colors.status(VehicleStatus::Maintenance));
        assert_ne!(colors.toast(ToastKind::Success), colors.toast(ToastKind::Error));
    }

    #[test]
    fn custom_theme_file_wins_over_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom: toml::Value =
            toml::from_str(include_str!("../../themes/catppuccin-latte.toml")).unwrap();
        custom["name"] = toml::Value::String("fleet-custom".into());
        file.write_all(toml::to_string(&custom).unwrap().as_bytes()).unwrap();

        let theme = Theme::resolve(Some("catppuccin-latte"), Some(file.path()));
        assert_eq!(theme.name, "fleet-custom");
    }

    #[test]
    fn broken_theme_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(DashboardError::Theme(_))));
        assert_eq!(Theme::resolve(Some("catppuccin-latte"), Some(file.path())).name, "catppuccin-latte");
        assert_eq!(Theme::resolve(Some("nope"), None).name, DEFAULT_THEME);
    }
}
