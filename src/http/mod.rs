//! HTTP request integration.
//!
//! # Data Flow
//! ```text
//! http::Request
//!     → request.rs (method, headers, host → Attributes; uri path)
//!     → routing::match_route
//!     → handler + params for the caller to dispatch on
//! ```
//!
//! Responses are the caller's business; nothing here produces one.

pub mod request;

pub use request::{attributes_from_request, match_request};
