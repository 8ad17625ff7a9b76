//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (main.rs) and the domain/api layers.
//! It never performs I/O: requests leave as actions and come back as events.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────────── HTTP Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine
//! - [`state`]: Central application state container and view model computation
//! - [`store`]: Vehicle list, draft and filter held while mounted

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
pub use store::ViewStore;
