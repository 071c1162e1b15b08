//! Integration tests for HTTP transport

use std::time::Duration;
use rustack_transport::{HttpRequest, HttpTransport, HttpTransportConfig, Transport, TransportError};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_http_request_builder() {
    let request = HttpRequest::new("GET", "https://cp.sbcloud.ru/v1/vm")
        .with_header("Authorization", "Bearer token123")
        .with_header("Accept-Language", "ru-ru");

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://cp.sbcloud.ru/v1/vm");
    assert_eq!(request.headers.len(), 2);
    assert_eq!(request.get_header("authorization"), Some("Bearer token123"));
}

#[tokio::test]
async fn test_sends_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/project"))
        .and(header("authorization", "Bearer token123"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"name":"demo"}"#))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Esu-Tasks", "task-1")
                .set_body_string(r#"{"id":"p1"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("POST", format!("{}/v1/project", server.uri()))
        .with_header("Authorization", "Bearer token123")
        .with_header("Content-Type", "application/json")
        .with_body(br#"{"name":"demo"}"#.to_vec());

    let response = transport.send_http(request).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.get_header("x-esu-tasks"), Some("task-1"));
    assert_eq!(response.text(), r#"{"id":"p1"}"#);
}

#[tokio::test]
async fn test_conflict_is_returned_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/vm/1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send_http(HttpRequest::new("GET", format!("{}/v1/vm/1", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status, 409);
    server.verify().await;
}

#[tokio::test]
async fn test_query_string_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/template"))
        .and(query_param("vdc", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send_http(HttpRequest::new(
            "GET",
            format!("{}/v1/template?vdc=abc", server.uri()),
        ))
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = HttpTransport::with_config(HttpTransportConfig {
        timeout: Duration::from_millis(50),
        ..Default::default()
    })
    .unwrap();

    let result = transport
        .send_http(HttpRequest::new("GET", format!("{}/slow", server.uri())))
        .await;

    assert!(matches!(result, Err(TransportError::Timeout)));
}

#[tokio::test]
async fn test_unsupported_method() {
    let transport = HttpTransport::new().unwrap();
    let result = transport
        .send_http(HttpRequest::new("NOT A METHOD", "http://127.0.0.1:1/"))
        .await;

    assert!(matches!(result, Err(TransportError::Http(_))));
}
