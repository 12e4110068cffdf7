//! HTTP server used by the rested-core integration tests.
//!
//! Three routes cover everything the sender tests need: `/echo` reports
//! exactly what arrived (method, path, query pairs, headers, body) as JSON,
//! `/status/{code}` answers with an arbitrary status code and an optional
//! `?body=` payload, and `/headers/multi` repeats a response header so
//! multi-value handling can be observed end to end.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, Request},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server observed about one incoming request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    /// Decoded query pairs in arrival order; repeated keys stay repeated.
    pub query: Vec<(String, String)>,
    /// Header name (lowercase) to values in arrival order.
    pub headers: HashMap<String, Vec<String>>,
    /// Body as text, lossily decoded.
    pub body: String,
}

#[derive(Deserialize)]
struct StatusParams {
    #[serde(default)]
    body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/headers/multi", get(multi_headers))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(request: Request) -> Json<Echo> {
    let (parts, body) = request.into_parts();

    let query = parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default();

    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in &parts.headers {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    Json(Echo {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

async fn status(Path(code): Path<u16>, Query(params): Query<StatusParams>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, params.body).into_response()
}

async fn multi_headers() -> Response {
    let mut response = (StatusCode::OK, "ok").into_response();
    let headers = response.headers_mut();
    headers.append("x-multi", HeaderValue::from_static("one"));
    headers.append("x-multi", HeaderValue::from_static("two"));
    response
}
