/// Log output tests for the lead webhook
/// Checks which personal data reaches the logs with and without LOG_LEAD_PAYLOADS
use std::io;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use elementor_caller::api::handlers::AppState;
use elementor_caller::config::Config;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn create_test_config(base_url: String, log_lead_payloads: bool) -> Config {
    Config {
        port: 3000,
        elevenlabs_agent_id: "agent_test_123".to_string(),
        xi_api_key: "xi_test_key".to_string(),
        elevenlabs_base_url: base_url,
        elevenlabs_timeout_secs: 5,
        log_lead_payloads,
    }
}

/// Sends one lead through the router and returns everything logged meanwhile.
async fn logs_for_lead(log_lead_payloads: bool) -> String {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/convai/agents/agent_test_123/calls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "conversation_id": "conv_abc"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    // Thread-local: the current-thread test runtime polls the handler here
    let _guard = tracing::subscriber::set_default(subscriber);

    let state = AppState::from_config(create_test_config(mock_server.uri(), log_lead_payloads))
        .unwrap();
    let app = elementor_caller::app(Arc::new(state));

    let request = Request::builder()
        .method("POST")
        .uri("/elementor/lead")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"name": "Ada Lovelace", "phone": "4155551234"}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    buffer.contents()
}

#[tokio::test]
async fn test_default_logs_redact_personal_data() {
    let logs = logs_for_lead(false).await;

    assert!(logs.contains("[ELEMENTOR] Incoming lead with fields: [name, phone]"));
    assert!(logs.contains("[OK] Normalized phone: ********1234"));
    assert!(!logs.contains("4155551234"), "raw phone leaked: {}", logs);
    assert!(!logs.contains("Ada Lovelace"), "name leaked: {}", logs);
    assert!(!logs.contains("[ELEVENLABS PAYLOAD]"));
}

#[tokio::test]
async fn test_payload_logging_writes_verbatim_data() {
    let logs = logs_for_lead(true).await;

    assert!(logs.contains("[ELEMENTOR] Incoming body:"));
    assert!(logs.contains("Ada Lovelace"));
    assert!(logs.contains("[OK] Normalized phone: 4155551234 → +14155551234"));
    assert!(logs.contains("[ELEVENLABS PAYLOAD]"));
    assert!(logs.contains("\"phone_number\":\"+14155551234\""));
    assert!(logs.contains("[ELEVENLABS RESPONSE]"));
    assert!(logs.contains("conv_abc"));
}
