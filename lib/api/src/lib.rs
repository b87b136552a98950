//! HTTP client for the Peakwave members API.
//!
//! The client speaks JSON over a cookie-authenticated session. Requests go
//! through the [`Transport`] trait so the dashboard can be driven against the
//! real server ([`HttpTransport`]) or a scripted one in tests.

mod client;
mod config;
mod error;
mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ApiClient, TestOutcome};
pub use config::ApiConfig;
pub use error::{ApiError, TransportError};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
