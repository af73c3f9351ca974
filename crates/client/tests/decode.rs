//! Response decoding through `Client::send` and `Response::error_for_status`.

mod common;

use std::io;
use std::pin::Pin;
use std::task::{self, Poll};

use common::client_for;
use reqwest::{Method, StatusCode};
use tado::{ApiError, ApiErrorCategory, Context, DecodeTarget, User, NO_BODY};
use tokio::io::AsyncWrite;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/v2/resource"))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Writer that rejects every write.
struct BrokenPipe;

impl AsyncWrite for BrokenPipe {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut task::Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut task::Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut task::Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[tokio::test]
async fn test_json_body_is_decoded() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"id": "abc", "email": "jane@example.com"})),
    )
    .await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut user = User::default();
    let info = client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut user))
        .await
        .unwrap();

    assert_eq!(info.status, StatusCode::OK);
    assert_eq!(user.id, "abc");
    assert_eq!(user.email, "jane@example.com");
}

#[tokio::test]
async fn test_empty_body_leaves_target_untouched() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(204)).await;
    let client = client_for(&server);

    let mut user = User::default();
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();
    client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut user))
        .await
        .unwrap();
    assert_eq!(user, User::default());

    let mut preset = User { name: "keep".to_string(), ..Default::default() };
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();
    client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut preset))
        .await
        .unwrap();
    assert_eq!(preset.name, "keep");
}

#[tokio::test]
async fn test_whitespace_body_counts_as_empty() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string(" \n")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut value = serde_json::Value::Null;
    client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut value))
        .await
        .unwrap();

    assert!(value.is_null());
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("{\"id\": ")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut user = User::default();
    let err = client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut user))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.category(), ApiErrorCategory::Decode);
}

#[tokio::test]
async fn test_writer_receives_raw_bytes() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("not json <at> all")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut sink: Vec<u8> = Vec::new();
    client
        .send(Some(&Context::background()), request, DecodeTarget::Writer(&mut sink))
        .await
        .unwrap();

    assert_eq!(sink, b"not json <at> all");
}

#[tokio::test]
async fn test_writer_failure_is_reported() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("payload")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut sink = BrokenPipe;
    let err = client
        .send(Some(&Context::background()), request, DecodeTarget::Writer(&mut sink))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Copy(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
}

#[tokio::test]
async fn test_discard_and_default_context() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(202).set_body_string("ignored")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let info = client.send(None, request, DecodeTarget::Discard).await.unwrap();

    assert_eq!(info.status, StatusCode::ACCEPTED);
    assert_eq!(info.url.path(), "/api/v2/resource");
}

#[tokio::test]
async fn test_send_does_not_classify_status() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({"errors": [{"code": "notFound", "title": "gone"}]})),
    )
    .await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let mut body = serde_json::Value::Null;
    let info = client
        .send(Some(&Context::background()), request, DecodeTarget::Json(&mut body))
        .await
        .unwrap();

    assert_eq!(info.status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"][0]["code"], "notFound");
}

#[tokio::test]
async fn test_error_for_status_parses_vendor_error() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{"code": "unauthorized", "title": "Full authentication is required"}]
        })),
    )
    .await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let response = client.dispatch(Some(&Context::background()), request).await.unwrap();
    let err = response.error_for_status().await.unwrap_err();

    assert_eq!(err.category(), ApiErrorCategory::Api);
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    let ApiError::Api { message, errors, url, .. } = err else { panic!("expected API error") };
    assert_eq!(message, "Full authentication is required");
    assert_eq!(errors[0].code, "unauthorized");
    assert_eq!(url.path(), "/api/v2/resource");
}

#[tokio::test]
async fn test_error_for_status_without_body_uses_reason() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(503)).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let response = client.dispatch(Some(&Context::background()), request).await.unwrap();
    let err = response.error_for_status().await.unwrap_err();

    assert!(matches!(err, ApiError::Api { ref message, .. } if message == "Service Unavailable"));
}

#[tokio::test]
async fn test_error_for_status_passes_success_through() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("{}")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let response = client.dispatch(Some(&Context::background()), request).await.unwrap();
    let response = response.error_for_status().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_error_for_status_with_html_body_uses_reason() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(502).set_body_string("<html>upstream down</html>")).await;
    let client = client_for(&server);
    let request = client.new_request(Method::GET, "resource", NO_BODY, &[]).unwrap();

    let response = client.dispatch(Some(&Context::background()), request).await.unwrap();
    let err = response.error_for_status().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Api { ref message, ref errors, .. } if message == "Bad Gateway" && errors.is_empty()
    ));
}
