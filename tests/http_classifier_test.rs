//! HTTP classifier client tests using wiremock.
//!
//! These tests verify that HttpClassifierClient speaks the
//! /classify_text and /classify_image contract and maps failures
//! onto user-facing messages.

use govsense::application::ports::ClassificationServicePort;
use govsense::domain::classification::{
    ClassificationRequest, ErrorKind, ImageFile, IMAGE_FALLBACK_MESSAGE, TEXT_FALLBACK_MESSAGE,
};
use govsense::infrastructure::adapters::{HttpClassifierClient, HttpClassifierClientConfig};
use wiremock::matchers::{body_json, header_regex, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// 返回一个当前无人监听的本地地址
fn unreachable_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn client_for(server: &MockServer) -> HttpClassifierClient {
    HttpClassifierClient::new(HttpClassifierClientConfig::new(server.uri())).unwrap()
}

fn text_request(text: &str) -> ClassificationRequest {
    ClassificationRequest::Text {
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_classify_text_passes_result_through() {
    let server = MockServer::start().await;
    let verdict = serde_json::json!({
        "classification": "constructive",
        "confidence": 0.9,
        "explanation": "Suggests a concrete improvement.",
        "raw_output": "CLASSIFICATION: constructive",
        "timestamp": "2025-01-01T00:00:00",
        "extra": {"nested": [1, 2, 3]}
    });

    Mock::given(method("POST"))
        .and(path("/classify_text"))
        .and(body_json(serde_json::json!({"text": "great policy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(verdict.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .classify(text_request("great policy"))
        .await
        .unwrap();

    assert_eq!(result.as_json(), &verdict);
}

#[tokio::test]
async fn test_classify_text_uses_detail_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify_text"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(serde_json::json!({"detail": "Text too long"})),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .classify(text_request(&"x".repeat(100_000)))
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Service);
    assert_eq!(error.message, "Text too long");
}

#[tokio::test]
async fn test_classify_text_without_detail_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify_text"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .classify(text_request("ok"))
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Service);
    assert_eq!(error.message, TEXT_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_malformed_success_body_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify_text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .classify(text_request("ok"))
        .await
        .unwrap_err();

    assert_eq!(error.message, TEXT_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_network_failure_uses_fallback() {
    let client =
        HttpClassifierClient::new(HttpClassifierClientConfig::new(unreachable_uri())).unwrap();

    let error = client.classify(text_request("ok")).await.unwrap_err();
    assert_eq!(error.kind, ErrorKind::Transport);
    assert_eq!(error.message, TEXT_FALLBACK_MESSAGE);

    let error = client
        .classify(ClassificationRequest::Image(ImageFile::from_bytes(
            vec![1, 2, 3],
            "a.png",
        )))
        .await
        .unwrap_err();
    assert_eq!(error.kind, ErrorKind::Transport);
    assert_eq!(error.message, IMAGE_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_classify_image_sends_multipart_file_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify_image"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(|request: &Request| {
            let body = String::from_utf8_lossy(&request.body).to_lowercase();
            body.contains("name=\"file\"")
                && body.contains("filename=\"protest.png\"")
                && body.contains("content-type: image/png")
                && body.contains("pngdata")
        })
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"classification": "neutral"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = ImageFile::from_bytes(b"PNGDATA".to_vec(), "protest.png");
    let result = client_for(&server)
        .classify(ClassificationRequest::Image(file))
        .await
        .unwrap();

    assert_eq!(result.as_json()["classification"], "neutral");
}

#[tokio::test]
async fn test_classify_image_rejection_uses_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify_image"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Invalid image format. Only JPG and PNG are supported."
        })))
        .mount(&server)
        .await;

    let file = ImageFile::from_bytes(b"GIF89a".to_vec(), "anim.gif");
    let error = client_for(&server)
        .classify(ClassificationRequest::Image(file))
        .await
        .unwrap_err();

    assert_eq!(error.message, "Invalid image format. Only JPG and PNG are supported.");
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "online",
            "service": "GovSense API"
        })))
        .mount(&server)
        .await;

    assert!(client_for(&server).health_check().await);

    let offline =
        HttpClassifierClient::new(HttpClassifierClientConfig::new(unreachable_uri())).unwrap();
    assert!(!offline.health_check().await);
}
