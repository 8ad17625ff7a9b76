//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration is read from and where logs are written.

pub mod paths;

pub use paths::{
    config_dir_from, data_dir_from, default_config_file, expand_tilde, expand_tilde_with, get_data_dir,
};
