//! End-to-end tests of `RequestSender` against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port (std listener handed to
//! a current-thread tokio runtime on a background thread) and then sends
//! real HTTP requests. The `/echo` endpoint reports what actually arrived on
//! the wire, so assertions here cover the sender's observable behavior, not
//! its internals.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use rested_core::{BasicAuth, Body, RequestOptions, RequestSender, Response, SendError};
use serde_json::json;

fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn echo_json(response: &Response) -> serde_json::Value {
    serde_json::from_slice(&response.body).unwrap()
}

fn echo_query_pairs(echo: &serde_json::Value) -> Vec<(String, String)> {
    echo["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[test]
fn absent_options_issue_one_plain_get() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let response = sender.send(&format!("http://{addr}/echo"), None).unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.status, "200 OK");
    let echo = echo_json(&response);
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["body"], "");
    assert!(echo["query"].as_array().unwrap().is_empty());
}

#[test]
fn query_options_union_with_the_uri_query() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let mut query = BTreeMap::new();
    query.insert("x".to_string(), "2".to_string());
    query.insert("y".to_string(), "3".to_string());
    let options = RequestOptions {
        query,
        ..Default::default()
    };

    let response = sender
        .send(&format!("http://{addr}/echo?x=1"), Some(&options))
        .unwrap();

    let pairs = echo_query_pairs(&echo_json(&response));
    assert!(pairs.contains(&("x".to_string(), "1".to_string())));
    assert!(pairs.contains(&("x".to_string(), "2".to_string())));
    assert!(pairs.contains(&("y".to_string(), "3".to_string())));
    assert_eq!(pairs.len(), 3);
}

#[test]
fn method_is_uppercased_on_the_wire() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let options = RequestOptions {
        method: Some("post".to_string()),
        ..Default::default()
    };
    let response = sender
        .send(&format!("http://{addr}/echo"), Some(&options))
        .unwrap();

    assert_eq!(echo_json(&response)["method"], "POST");
}

#[test]
fn extra_headers_are_added_with_duplicates() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let options = RequestOptions {
        headers: vec![
            ("x-tag".to_string(), "a".to_string()),
            ("x-tag".to_string(), "b".to_string()),
        ],
        ..Default::default()
    };
    let response = sender
        .send(&format!("http://{addr}/echo"), Some(&options))
        .unwrap();

    assert_eq!(echo_json(&response)["headers"]["x-tag"], json!(["a", "b"]));
}

#[test]
fn basic_auth_arrives_as_a_standard_header() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let options = RequestOptions {
        auth: Some(BasicAuth::new("alice", "secret")),
        ..Default::default()
    };
    let response = sender
        .send(&format!("http://{addr}/echo"), Some(&options))
        .unwrap();

    assert_eq!(
        echo_json(&response)["headers"]["authorization"],
        json!(["Basic YWxpY2U6c2VjcmV0"])
    );
}

#[test]
fn raw_body_and_content_type_arrive_unchanged() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let options = RequestOptions {
        method: Some("POST".to_string()),
        content_type: Some("application/json".to_string()),
        body: Some(Body::from(r#"{"k":"v"}"#)),
        ..Default::default()
    };
    let response = sender
        .send(&format!("http://{addr}/echo"), Some(&options))
        .unwrap();

    let echo = echo_json(&response);
    assert_eq!(echo["body"], r#"{"k":"v"}"#);
    assert_eq!(echo["headers"]["content-type"], json!(["application/json"]));
}

#[test]
fn form_body_is_encoded_and_forces_its_content_type() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let mut fields = BTreeMap::new();
    fields.insert("a".to_string(), "1".to_string());
    fields.insert("b".to_string(), "2".to_string());
    let options = RequestOptions {
        method: Some("POST".to_string()),
        content_type: Some("text/plain".to_string()),
        body: Some(Body::Form(fields)),
        ..Default::default()
    };
    let response = sender
        .send(&format!("http://{addr}/echo"), Some(&options))
        .unwrap();

    let echo = echo_json(&response);
    assert_eq!(echo["body"], "a=1&b=2");
    assert_eq!(
        echo["headers"]["content-type"],
        json!(["application/x-www-form-urlencoded"])
    );
}

#[test]
fn status_400_and_up_is_a_soft_error_with_payload() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let err = sender
        .send(&format!("http://{addr}/status/404?body=not%20found"), None)
        .unwrap_err();

    let response = err.response().expect("status error carries the response");
    assert_eq!(response.code, 404);
    assert_eq!(response.status, "404 Not Found");
    assert_eq!(response.body, b"not found");
    let message = err.to_string();
    assert!(message.contains("404"), "message was: {message}");
    assert!(message.contains("not found"), "message was: {message}");
}

#[test]
fn multi_value_response_headers_are_preserved_in_order() {
    let addr = spawn_server();
    let sender = RequestSender::new();

    let response = sender
        .send(&format!("http://{addr}/headers/multi"), None)
        .unwrap();

    assert_eq!(response.headers.get_all("x-multi"), ["one", "two"]);
    assert_eq!(response.headers.get("X-Multi"), Some("one"));
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = RequestSender::new()
        .send(&format!("http://{addr}/"), None)
        .unwrap_err();

    assert!(matches!(err, SendError::Transport(_)));
    assert!(err.response().is_none());
}

#[test]
fn invalid_uri_sends_nothing() {
    let err = RequestSender::new().send("://nope", None).unwrap_err();
    assert!(matches!(err, SendError::InvalidUri(_)));
}
