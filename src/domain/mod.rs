//! Domain layer for the vehicle dashboard.
//!
//! Core types independent of the terminal runtime or the HTTP transport.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`vehicle`]: Vehicle entity, status, filter and draft types
//!
//! # Examples
//!
//! ```
//! use vehicle_dashboard::domain::{StatusFilter, Vehicle, VehicleId, VehicleStatus};
//!
//! let van = Vehicle {
//!     id: VehicleId::new("1"),
//!     name: "Van".to_string(),
//!     status: VehicleStatus::Inactive,
//!     last_updated: None,
//! };
//! assert!(StatusFilter::Only(VehicleStatus::Inactive).matches(&van));
//! ```

pub mod error;
pub mod vehicle;

pub use error::{DashboardError, Operation, Result};
pub use vehicle::{Draft, DraftPatch, StatusFilter, Vehicle, VehicleId, VehicleStatus};
