//! Error types for the vehicle dashboard.
//!
//! This module defines the centralized error type [`DashboardError`] and a type alias
//! [`Result`] used throughout the crate. The first three variants form the
//! taxonomy the orchestration layer reacts to; the rest are ambient failures
//! (configuration, theming, terminal I/O) that propagate to `main`.

use thiserror::Error;

/// Remote operation an error or request belongs to.
///
/// Carried by [`DashboardError::RequestFailed`] so that the handler can pick the
/// operation-specific user message without inspecting the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /api/vehicles`
    List,
    /// `POST /api/vehicles`
    Create,
    /// `PUT /api/vehicles/{id}`
    UpdateStatus,
}

impl Operation {
    /// Lowercase tag used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::UpdateStatus => "update_status",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for dashboard operations.
///
/// # Examples
///
/// ```
/// use vehicle_dashboard::domain::{DashboardError, Operation};
///
/// let err = DashboardError::RequestFailed {
///     operation: Operation::List,
///     cause: "HTTP 503: upstream unavailable".to_string(),
/// };
/// assert_eq!(err.to_string(), "list request failed: HTTP 503: upstream unavailable");
/// ```
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input rejected locally before any request was built.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The list response was not a vehicle array or a `{ "vehicles": [...] }` object.
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Transport or service-level failure for a remote operation.
    ///
    /// `cause` is meant for the diagnostic log only.
    #[error("{operation} request failed: {cause}")]
    RequestFailed {
        /// Operation that failed.
        operation: Operation,
        /// Underlying transport error text or status/body summary.
        cause: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The terminal could not be put into or taken out of dashboard mode.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;
