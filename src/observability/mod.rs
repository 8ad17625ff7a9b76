//! File-based diagnostic logging.
//!
//! The dashboard draws on the terminal, so diagnostics go to a size-rotated
//! log file instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → dashboard.log (+ backups)
//! ```
//!
//! # Configuration
//!
//! The filter is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! The file lives in the configured data directory (see
//! [`Config::data_dir`](crate::Config::data_dir)), rotating at 10 MB with 3
//! backups kept.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{FileWriter, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{filter_directive, init_logging, LOG_FILE_NAME};
