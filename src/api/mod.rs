//! Remote collection client for the vehicle service.
//!
//! The client is split along the I/O boundary:
//!
//! - [`client`]: URL layout, request bodies, and response decoding (pure)
//! - [`messages`]: request/response values passed between core and runtime
//! - [`transport`]: the `reqwest` executor used by the runtime
//!
//! ```text
//! handler ──Action::Send(ApiRequest)──▶ runtime ──▶ HttpTransport
//!    ▲                                                   │
//!    └────────Event::Response(ctx, ApiResponse)◀─────────┘
//! ```

pub mod client;
pub mod messages;
pub mod transport;

pub use client::{ListPayload, VehicleApi};
pub use messages::{ApiRequest, ApiResponse, HttpMethod, RequestContext};
pub use transport::HttpTransport;
