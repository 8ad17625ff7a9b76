//! Vehicle Dashboard: a terminal client for a remote vehicle collection.
//!
//! The dashboard mirrors a fleet held by an HTTP service. It:
//! - Fetches the full vehicle list on mount and shows it in a table
//! - Adds vehicles through a draft form with a single required-field check
//! - Changes a vehicle's status through three fixed per-row actions
//! - Filters the table by status without contacting the service
//! - Reports outcomes as transient success/error notifications
//!
//! Every mutation is followed by a full re-fetch; the local list is never
//! patched by hand.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Runtime (main.rs)                         │  ← Entry point
//! │  crossterm input · tokio tasks · reqwest transport  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, mount lifecycle                  │
//! │  - View store (list, draft, filter)                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Notify        │
//! │ (ui/)         │   │ (api/)        │   │ (notify)      │
//! │ - Rendering   │   │ - Requests    │   │ - Notifier    │
//! │ - Theming     │   │ - Decoding    │   │ - Toasts      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Vehicle model, errors (domain/)                  │
//! │  - Config and data paths (infrastructure/)          │
//! │  - File logging (observability/)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/vehicle-dashboard/config.toml
//! base_url = "http://localhost:5000"
//! theme = "catppuccin-latte"
//! trace_level = "debug"
//! toast_seconds = 5
//! ```
//!
//! Command-line flags and `VEHICLE_DASHBOARD_BASE_URL` override the file.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::notify::ToastQueue;
//! use vehicle_dashboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let mut toasts = ToastQueue::new();
//!
//! let (_, actions) = handle_event(&mut state, &Event::Mount, &mut toasts)?;
//! let Some(Action::Send(request)) = actions.first() else { unreachable!() };
//! assert_eq!(request.url, "http://localhost:5000/api/vehicles");
//! # Ok::<(), vehicle_dashboard::DashboardError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{DashboardError, Result, Vehicle, VehicleStatus};
pub use ui::Theme;

use api::VehicleApi;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Service origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default notification lifetime in seconds.
pub const DEFAULT_TOAST_SECONDS: u64 = 5;

/// Dashboard configuration.
///
/// Read from a TOML file and then overridden by command-line flags. Every
/// key is optional; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin of the vehicle service. Trailing slashes are trimmed.
    pub base_url: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is expanded.
    pub theme_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `vehicle_dashboard=trace`.
    pub trace_level: Option<String>,

    /// How long a notification stays visible.
    pub toast_seconds: u64,

    /// Directory for the log file; `~` is expanded.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            toast_seconds: DEFAULT_TOAST_SECONDS,
            data_dir: None,
        }
    }
}

/// Values given on the command line; `None` leaves the file value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub theme_name: Option<String>,
    pub theme_file: Option<PathBuf>,
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] on syntax errors, unknown keys, or
    /// invalid values.
    ///
    /// ```rust
    /// use vehicle_dashboard::Config;
    ///
    /// let config = Config::from_toml_str("base_url = \"http://fleet.local/\"").unwrap();
    /// assert_eq!(config.base_url, "http://fleet.local");
    /// assert_eq!(config.toast_seconds, 5);
    /// assert!(Config::from_toml_str("colour = \"red\"").is_err());
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validated()
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))
    }

    /// Loads the config file: `explicit` must exist, while the default
    /// location is only read when present. Falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] when a file that is read is invalid,
    /// or when `explicit` does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match infrastructure::default_config_file() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides and re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] when an override is invalid.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if overrides.theme_name.is_some() {
            self.theme_name = overrides.theme_name;
        }
        if overrides.theme_file.is_some() {
            self.theme_file = overrides.theme_file;
        }
        if overrides.trace_level.is_some() {
            self.trace_level = overrides.trace_level;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            return Err(DashboardError::Config("base_url must not be empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(DashboardError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.toast_seconds == 0 {
            return Err(DashboardError::Config("toast_seconds must be at least 1".to_string()));
        }
        Ok(self)
    }

    /// Resolved log directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, infrastructure::expand_tilde)
    }

    /// Resolved custom theme path.
    #[must_use]
    pub fn theme_path(&self) -> Option<PathBuf> {
        self.theme_file.as_deref().map(infrastructure::expand_tilde)
    }

    #[must_use]
    pub const fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }
}

/// Builds an unmounted dashboard from configuration.
///
/// Loads the theme (file, then name, then default) and points the API client
/// at the configured origin. Mounting is left to the caller so the first
/// fetch goes through the normal event path.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, "initializing dashboard");

    let theme_path = config.theme_path();
    let theme = Theme::resolve(config.theme_name.as_deref(), theme_path.as_deref());
    tracing::debug!(theme = %theme.name, "theme loaded");

    AppState::new(VehicleApi::new(config.base_url.clone()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn full_file_parses() {
        let config = Config::from_toml_str(
            r#"
            base_url = "https://fleet.example.com//"
            theme = "catppuccin-latte"
            theme_file = "~/themes/fleet.toml"
            trace_level = "debug"
            toast_seconds = 8
            data_dir = "/var/log/fleet"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://fleet.example.com");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.toast_duration(), Duration::from_secs(8));
        assert_eq!(config.data_dir(), PathBuf::from("/var/log/fleet"));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for doc in [
            "base_url = \"\"",
            "base_url = \"ftp://fleet\"",
            "toast_seconds = 0",
            "toast_seconds = \"five\"",
            "scan_paths = []",
        ] {
            assert!(
                matches!(Config::from_toml_str(doc), Err(DashboardError::Config(_))),
                "{doc}"
            );
        }
    }

    #[test]
    fn overrides_replace_file_values() {
        let base = Config::from_toml_str("theme = \"catppuccin-latte\"\ntrace_level = \"warn\"").unwrap();
        let config = base
            .with_overrides(ConfigOverrides {
                base_url: Some("http://10.0.0.7:8080/".into()),
                trace_level: Some("trace".into()),
                ..ConfigOverrides::default()
            })
            .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.7:8080");
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("trace"));
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(DashboardError::Config(_))));

        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://fleet.test\"").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().base_url, "http://fleet.test");
    }

    #[test]
    fn initialize_uses_configured_theme_and_origin() {
        let config = Config {
            base_url: "http://fleet.test".into(),
            theme_name: Some("catppuccin-latte".into()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert_eq!(state.api.base_url(), "http://fleet.test");
        assert!(!state.is_mounted());
    }
}
