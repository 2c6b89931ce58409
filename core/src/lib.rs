//! API client core for the career tracker backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A blocking `UreqTransport`
//! is available for hosts that want the round-trip done for them.
//!
//! # Design
//! - `ApiClient` holds the base URL and an optional shared `SessionContext`
//!   that supplies auth headers at build time.
//! - Each backend resource has its own module under `api`, split into
//!   `build_*` (produces request) and `parse_*` (consumes response).
//! - `simulation` holds the pure shaping helpers: form input to request
//!   body, and stored records to display projections.
//! - `guard::LatestOnly` lets views drop responses that arrive after a
//!   newer fetch started or after the view went away.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod session;
pub mod simulation;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use guard::{FetchTicket, LatestOnly};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{Session, SessionContext};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
