//! Path helpers for configuration and data locations.
//!
//! Locations follow the XDG base directory layout with the usual fallbacks
//! under `$HOME`. The `*_from` variants take the environment as arguments so
//! the resolution rules can be tested without touching process state.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory name used under the config and data roots.
pub const APP_DIR: &str = "vehicle-dashboard";

/// Default configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Data directory from explicit `XDG_DATA_HOME` and `HOME` values.
///
/// ```
/// use std::path::PathBuf;
/// use vehicle_dashboard::infrastructure::data_dir_from;
///
/// assert_eq!(
///     data_dir_from(None, Some("/home/ada".into())),
///     PathBuf::from("/home/ada/.local/share/vehicle-dashboard"),
/// );
/// ```
#[must_use]
pub fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    non_empty(xdg_data_home)
        .or_else(|| non_empty(home).map(|h| h.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Returns the data directory (log files).
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(env::var_os("XDG_DATA_HOME"), env::var_os("HOME"))
}

/// Config directory from explicit `XDG_CONFIG_HOME` and `HOME` values.
#[must_use]
pub fn config_dir_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    non_empty(xdg_config_home)
        .or_else(|| non_empty(home).map(|h| h.join(".config")))
        .map(|root| root.join(APP_DIR))
}

/// Returns the default config file path, if a config root can be found.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir_from(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME")).map(|d| d.join(CONFIG_FILE))
}

/// Expands a leading `~` against `home`. Other paths are returned unchanged.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use vehicle_dashboard::infrastructure::expand_tilde_with;
///
/// let home = Some(Path::new("/home/ada"));
/// assert_eq!(expand_tilde_with(Path::new("~/themes/t.toml"), home), PathBuf::from("/home/ada/themes/t.toml"));
/// assert_eq!(expand_tilde_with(Path::new("~"), home), PathBuf::from("/home/ada"));
/// assert_eq!(expand_tilde_with(Path::new("/etc/t.toml"), home), PathBuf::from("/etc/t.toml"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Expands a leading `~` using `$HOME`.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let home = non_empty(env::var_os("HOME"));
    expand_tilde_with(path, home.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_data_home_wins() {
        assert_eq!(
            data_dir_from(Some("/xdg".into()), Some("/home/ada".into())),
            PathBuf::from("/xdg/vehicle-dashboard")
        );
        assert_eq!(
            data_dir_from(Some("".into()), Some("/home/ada".into())),
            PathBuf::from("/home/ada/.local/share/vehicle-dashboard")
        );
        assert_eq!(data_dir_from(None, None), PathBuf::from("./vehicle-dashboard"));
    }

    #[test]
    fn config_dir_resolution() {
        assert_eq!(
            config_dir_from(None, Some("/home/ada".into())),
            Some(PathBuf::from("/home/ada/.config/vehicle-dashboard"))
        );
        assert_eq!(
            config_dir_from(Some("/cfg".into()), None),
            Some(PathBuf::from("/cfg/vehicle-dashboard"))
        );
        assert_eq!(config_dir_from(None, None), None);
    }

    #[test]
    fn tilde_only_expands_as_leading_component() {
        let home = Some(Path::new("/home/ada"));
        assert_eq!(expand_tilde_with(Path::new("~user/x"), home), PathBuf::from("~user/x"));
        assert_eq!(expand_tilde_with(Path::new("a/~/b"), home), PathBuf::from("a/~/b"));
        assert_eq!(expand_tilde_with(Path::new("~/x"), None), PathBuf::from("~/x"));
    }
}
