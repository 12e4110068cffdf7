//! Caller-facing request configuration.
//!
//! # Design
//! `RequestOptions` mirrors the fields a caller sets before one HTTP call.
//! Everything is plain owned data with public fields and a `Default` impl,
//! so a call site fills in only what it needs and leaves the rest. The
//! sender treats the value as immutable; nothing here touches the network.

use std::collections::BTreeMap;

/// Configuration for a single HTTP call. Values can be omitted based on the
/// request method (a GET typically won't set a body).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request method, case-insensitive. `None` or empty means GET.
    pub method: Option<String>,
    /// Query parameters added to any parameters already in the URI.
    pub query: BTreeMap<String, String>,
    /// Content type, set on the request only when non-empty.
    pub content_type: Option<String>,
    /// Request entity.
    pub body: Option<Body>,
    /// Basic-auth credentials.
    pub auth: Option<BasicAuth>,
    /// Extra headers, each pair added (not replacing) on the request.
    /// Repeated names produce repeated headers.
    pub headers: Vec<(String, String)>,
}

/// Request entity in one of two modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Bytes sent as-is.
    Raw(Vec<u8>),
    /// Flat key/value map sent URL-form-encoded. Selecting this mode forces
    /// `Content-Type: application/x-www-form-urlencoded`, overriding any
    /// explicit content type in the options.
    Form(BTreeMap<String, String>),
}

impl Body {
    /// Encode the entity into the bytes that go on the wire.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Body::Raw(bytes) => bytes.clone(),
            Body::Form(fields) => url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(fields)
                .finish()
                .into_bytes(),
        }
    }

    /// Content type this entity forces, if any.
    pub fn forced_content_type(&self) -> Option<&'static str> {
        match self {
            Body::Raw(_) => None,
            Body::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Raw(bytes.to_vec())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Raw(s.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Raw(s.as_bytes().to_vec())
    }
}

/// Username/password pair for HTTP basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
