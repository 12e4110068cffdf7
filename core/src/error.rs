//! Error types for the request sender.
//!
//! # Design
//! The three failure classes callers need to tell apart get their own
//! variants: configuration problems fail before any I/O, transport problems
//! carry no status code, and an HTTP status >= 400 is a "soft" error that
//! still delivers the full response so callers can inspect the server's
//! error body.

use std::fmt;

use crate::response::Response;

/// Errors returned by `RequestSender::send`.
#[derive(Debug)]
pub enum SendError {
    /// The URI could not be parsed. No request was sent.
    InvalidUri(String),

    /// The URI parsed but the request could not be assembled (unusable
    /// method token or header name/value). No request was sent.
    InvalidRequest(String),

    /// Network-level failure: DNS, connection, or TLS handshake. No status
    /// code was received.
    Transport(String),

    /// The server answered with a status code >= 400. The normalized
    /// response rides inside the error.
    Status(Response),
}

impl SendError {
    /// The response delivered alongside a status error, if this is one.
    pub fn response(&self) -> Option<&Response> {
        match self {
            SendError::Status(response) => Some(response),
            _ => None,
        }
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::InvalidUri(msg) => write!(f, "invalid URI: {msg}"),
            SendError::InvalidRequest(msg) => write!(f, "request build failed: {msg}"),
            SendError::Transport(msg) => write!(f, "transport failed: {msg}"),
            SendError::Status(response) => {
                write!(f, "HTTP {}: {}", response.code, response.text())
            }
        }
    }
}

impl std::error::Error for SendError {}
