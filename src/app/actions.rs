//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! core never touches the network or the terminal itself; the runtime executes
//! these in order.
//!
//! # Example
//!
//! ```rust
//! use vehicle_dashboard::api::VehicleApi;
//! use vehicle_dashboard::app::Action;
//!
//! let api = VehicleApi::new("http://localhost:5000");
//! let actions = vec![Action::Send(api.list_request(1, 1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::ApiRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Performs an HTTP request and reports the outcome as
    /// [`Event::Response`](crate::app::Event::Response).
    ///
    /// Requests are independent: several may be in flight at once and their
    /// responses are handled in arrival order.
    Send(ApiRequest),

    /// Leaves the dashboard and restores the terminal.
    Quit,
}
