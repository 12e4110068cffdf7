//! Small helper for calling RESTful APIs.
//!
//! # Overview
//! One call, one request: `RequestSender::send` takes a URI and a set of
//! `RequestOptions` (method, query, body, basic auth, headers), issues the
//! request, and normalizes whatever comes back into a `Response` or a
//! `SendError`.
//!
//! # Design
//! - `RequestSender` holds one shared `ureq::Agent`, built once; cloning the
//!   sender shares the agent. TLS certificate verification is disabled by
//!   default (a deliberate, documented choice) and can be enabled through
//!   `RequestSender::with_tls_verification`.
//! - Request assembly and response normalization are pure functions around a
//!   single transport call, so they are testable without a network.
//! - An HTTP status >= 400 is a soft error: `SendError::Status` still
//!   carries the complete response for inspection. Transport failures carry
//!   no status code at all.
//! - Nothing is logged and nothing is retried; errors go straight back to
//!   the caller.

pub mod error;
pub mod options;
pub mod response;
pub mod sender;

pub use error::SendError;
pub use options::{BasicAuth, Body, RequestOptions};
pub use response::{Headers, Response};
pub use sender::RequestSender;
