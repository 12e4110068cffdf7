//! Request assembly, transport execution, and response normalization.
//!
//! # Design
//! `send` is split into a pure `prepare` step (URI parsing, query merging,
//! header assembly) and a pure `normalize` step (status-line and soft-error
//! handling), with exactly one transport call between them. Both pure steps
//! are unit-tested without touching the network; the round-trip is covered
//! by the integration tests against the mock server.
//!
//! The `ureq::Agent` is built once in the constructor and shared across all
//! calls. Agents are thread-safe and cheaply cloneable, so one sender can
//! serve many concurrent callers without re-allocating TLS configuration.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ureq::http;
use ureq::tls::TlsConfig;
use ureq::Agent;
use url::Url;

use crate::error::SendError;
use crate::options::RequestOptions;
use crate::response::{Headers, Response};

/// Sends HTTP requests configured by `RequestOptions` and normalizes the
/// responses.
///
/// TLS certificate verification is disabled by default, replicating the
/// behavior of the services this helper was written against. Pass `true` to
/// [`RequestSender::with_tls_verification`] to turn verification back on.
#[derive(Clone)]
pub struct RequestSender {
    agent: Agent,
    verify_tls: bool,
}

impl RequestSender {
    /// Sender with TLS certificate verification disabled (the historical
    /// default).
    pub fn new() -> Self {
        Self::with_tls_verification(false)
    }

    /// Sender with an explicit TLS verification choice.
    pub fn with_tls_verification(verify_tls: bool) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_tls)
                    .build(),
            )
            .build();
        Self {
            agent: config.new_agent(),
            verify_tls,
        }
    }

    /// Whether this sender verifies TLS certificates.
    pub fn verifies_tls(&self) -> bool {
        self.verify_tls
    }

    /// Issue one HTTP request against `uri` as configured by `options`.
    ///
    /// With `options` absent this is a plain GET: no body, no auth, no extra
    /// headers, only the query parameters already in the URI. A status code
    /// >= 400 comes back as `SendError::Status` carrying the full response.
    pub fn send(
        &self,
        uri: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Response, SendError> {
        let prepared = prepare(uri, options)?;
        let request = build_http(&prepared)?;

        let mut transported = self
            .agent
            .run(request)
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let code = transported.status().as_u16();
        let status = match transported.status().canonical_reason() {
            Some(reason) => format!("{code} {reason}"),
            None => code.to_string(),
        };

        let mut headers = Headers::new();
        for (name, value) in transported.headers() {
            headers.append(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
        }

        // A failed read yields an empty body rather than a distinct error.
        let body = transported.body_mut().read_to_vec().unwrap_or_default();

        normalize(code, status, headers, body)
    }
}

impl Default for RequestSender {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSender")
            .field("verify_tls", &self.verify_tls)
            .finish_non_exhaustive()
    }
}

/// Everything needed to put one request on the wire, as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PreparedRequest {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Resolve `uri` + `options` into a `PreparedRequest`. Pure; no I/O.
fn prepare(
    uri: &str,
    options: Option<&RequestOptions>,
) -> Result<PreparedRequest, SendError> {
    let mut url = Url::parse(uri).map_err(|e| SendError::InvalidUri(e.to_string()))?;

    let Some(options) = options else {
        return Ok(PreparedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        });
    };

    // Options pairs are appended to whatever query the URI already carries,
    // so a key present in both produces multiple values.
    if !options.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &options.query {
            pairs.append_pair(name, value);
        }
    }

    let method = match options.method.as_deref() {
        None | Some("") => "GET".to_string(),
        Some(m) => m.to_ascii_uppercase(),
    };

    let (body, forced_content_type) = match &options.body {
        Some(body) => (body.encode(), body.forced_content_type()),
        None => (Vec::new(), None),
    };

    let mut headers = Vec::new();
    let content_type = forced_content_type
        .map(str::to_string)
        .or_else(|| options.content_type.clone().filter(|ct| !ct.is_empty()));
    if let Some(content_type) = content_type {
        headers.push(("content-type".to_string(), content_type));
    }
    if let Some(auth) = &options.auth {
        let credentials = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
        headers.push(("authorization".to_string(), format!("Basic {credentials}")));
    }
    headers.extend(options.headers.iter().cloned());

    Ok(PreparedRequest {
        method,
        url: url.to_string(),
        headers,
        body,
    })
}

/// Turn a `PreparedRequest` into an `http::Request`. Pure; fails before any
/// I/O when the method token or a header name/value is unusable.
fn build_http(prepared: &PreparedRequest) -> Result<http::Request<&[u8]>, SendError> {
    let mut builder = http::Request::builder()
        .method(prepared.method.as_str())
        .uri(prepared.url.as_str());
    for (name, value) in &prepared.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(prepared.body.as_slice())
        .map_err(|e| SendError::InvalidRequest(e.to_string()))
}

/// Apply the soft-error rule: status >= 400 becomes `SendError::Status`
/// while still carrying the full payload.
fn normalize(
    code: u16,
    status: String,
    headers: Headers,
    body: Vec<u8>,
) -> Result<Response, SendError> {
    let response = Response {
        status,
        code,
        headers,
        body,
    };
    if response.code >= 400 {
        return Err(SendError::Status(response));
    }
    Ok(response)
}
