//! Wire-level tests for the banking service adapters
//!
//! Pin the HTTP contract of the transcription and payment endpoints
//! against a mock server: request shape, envelope handling and the
//! error mapping for each way the service can let us down.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voicepay::application::ports::{
    PaymentError, PaymentGateway, PaymentRequest, Transcriber, TranscriptionError,
};
use voicepay::domain::speech::AudioClip;
use voicepay::infrastructure::{HttpPaymentGateway, HttpTranscriber};

fn clip() -> AudioClip {
    AudioClip::wav(b"RIFFfake-wav-bytes".to_vec())
}

fn transfer() -> PaymentRequest {
    PaymentRequest {
        sender_phone: "9876543210".to_string(),
        receiver_phone: "9876501234".to_string(),
        amount: 500,
    }
}

#[tokio::test]
async fn stt_returns_the_transcribed_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "text": "  send money to alice  ",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    let text = transcriber.transcribe(&clip()).await.unwrap();
    assert_eq!(text, "send money to alice");
}

#[tokio::test]
async fn stt_posts_the_clip_as_a_multipart_audio_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "text": "hello",
        })))
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    transcriber.transcribe(&clip()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("multipart/form-data"),
        "unexpected content type: {}",
        content_type
    );

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"audio\""));
    assert!(body.contains("filename=\"speech.wav\""));
    assert!(body.contains("audio/wav"));
}

#[tokio::test]
async fn stt_failure_envelope_is_service_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "no speech detected",
        })))
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    let err = transcriber.transcribe(&clip()).await.unwrap_err();
    match err {
        TranscriptionError::ServiceFailed(detail) => {
            assert_eq!(detail, "no speech detected");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn stt_http_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    let err = transcriber.transcribe(&clip()).await.unwrap_err();
    assert!(matches!(err, TranscriptionError::Http(500)));
}

#[tokio::test]
async fn stt_blank_text_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "text": "   ",
        })))
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    let err = transcriber.transcribe(&clip()).await.unwrap_err();
    assert!(matches!(err, TranscriptionError::EmptyResponse));
}

#[tokio::test]
async fn stt_malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let transcriber = HttpTranscriber::new(server.uri());
    let err = transcriber.transcribe(&clip()).await.unwrap_err();
    assert!(matches!(err, TranscriptionError::Parse(_)));
}

#[tokio::test]
async fn pay_submits_the_transfer_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pay"))
        .and(body_json(json!({
            "sender_phone": "9876543210",
            "receiver_phone": "9876501234",
            "amount": 500,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri());
    gateway.submit(&transfer()).await.unwrap();
}

#[tokio::test]
async fn pay_decline_carries_the_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "message": "Insufficient balance",
        })))
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri());
    let err = gateway.submit(&transfer()).await.unwrap_err();
    match err {
        PaymentError::Declined(detail) => assert_eq!(detail, "Insufficient balance"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn pay_decline_without_message_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
        })))
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri());
    let err = gateway.submit(&transfer()).await.unwrap_err();
    match err {
        PaymentError::Declined(detail) => assert_eq!(detail, "failed"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn pay_http_error_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pay"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gateway = HttpPaymentGateway::new(server.uri());
    let err = gateway.submit(&transfer()).await.unwrap_err();
    assert!(matches!(err, PaymentError::Http(503)));
}

/// Live check against a running banking service.
/// Run with: cargo test --test wire_tests -- --ignored
#[tokio::test]
#[ignore = "requires the banking service on 127.0.0.1:5000"]
async fn live_stt_endpoint_is_reachable() {
    let server = std::env::var("VOICEPAY_SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let transcriber = HttpTranscriber::new(&server);

    // The clip is not real speech, so any envelope answer is fine.
    // Only failing to reach the service is a problem.
    let result = transcriber.transcribe(&clip()).await;
    if let Err(e) = &result {
        assert!(
            !matches!(e, TranscriptionError::Network(_)),
            "service unreachable: {:?}",
            e
        );
    }
}
