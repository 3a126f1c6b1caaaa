use crate::errors::AppError;
use crate::phone::mask_phone;
use serde::Serialize;
use std::time::Duration;

/// `metadata.source` on every outbound call.
pub const LEAD_SOURCE: &str = "elementor";
/// Client identification sent in `conversation_initiation_client_data`.
pub const CLIENT_NAME: &str = "elementor-caller";
pub const CLIENT_VERSION: &str = "1.0.0";

/// Longest slice of an upstream error body kept in `UpstreamError`.
const MAX_ERROR_BODY_CHARS: usize = 512;
/// Digit runs at least this long are treated as phone numbers.
const MIN_MASKED_DIGITS: usize = 7;

/// Body of an ElevenLabs outbound call request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutboundCallRequest {
    pub phone_number: String,
    pub metadata: CallMetadata,
    pub conversation_initiation_client_data: ConversationInitiationClientData,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallMetadata {
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConversationInitiationClientData {
    pub source_info: SourceInfo,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SourceInfo {
    pub name: String,
    pub version: String,
}

impl OutboundCallRequest {
    /// Build the payload for a normalized (E.164) phone number.
    pub fn new(phone_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            metadata: CallMetadata {
                name: name.into(),
                source: LEAD_SOURCE.to_string(),
            },
            conversation_initiation_client_data: ConversationInitiationClientData {
                source_info: SourceInfo {
                    name: CLIENT_NAME.to_string(),
                    version: CLIENT_VERSION.to_string(),
                },
            },
        }
    }
}

/// Client for the ElevenLabs conversational AI outbound call API.
#[derive(Clone)]
pub struct ElevenLabsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ElevenLabsClient {
    /// Creates a new `ElevenLabsClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, e.g. `https://api.elevenlabs.io`.
    /// * `api_key` - Sent as the `xi-api-key` header.
    /// * `timeout` - Whole-request timeout for each call.
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::UpstreamError(format!("Failed to create ElevenLabs client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Asks `agent_id` to place an outbound call.
    ///
    /// Sends exactly one request. Transport failures and non-2xx statuses
    /// both come back as `AppError::UpstreamError` carrying the detail.
    ///
    /// # Returns
    ///
    /// * `Result<serde_json::Value, AppError>` - The upstream response body
    ///   (`Value::Null` when it is empty or not JSON).
    pub async fn start_outbound_call(
        &self,
        agent_id: &str,
        payload: &OutboundCallRequest,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/v1/convai/agents/{}/calls", self.base_url, agent_id);
        tracing::info!("Requesting outbound call from agent {}", agent_id);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(format!("ElevenLabs request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::UpstreamError(format!(
                "ElevenLabs returned {}: {}",
                status,
                redact_error_body(&body)
            )));
        }

        let data = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        Ok(data)
    }
}

/// Mask every phone-like digit run in an upstream body and cap its length.
///
/// Error bodies may echo the dialed number in any format.
fn redact_error_body(body: &str) -> String {
    let mut redacted = String::with_capacity(body.len());
    let mut digits = String::new();
    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush_digits(&mut redacted, &mut digits);
            redacted.push(c);
        }
    }
    flush_digits(&mut redacted, &mut digits);

    if redacted.chars().count() > MAX_ERROR_BODY_CHARS {
        let mut truncated: String = redacted.chars().take(MAX_ERROR_BODY_CHARS).collect();
        truncated.push('…');
        truncated
    } else {
        redacted
    }
}

fn flush_digits(out: &mut String, digits: &mut String) {
    if digits.len() >= MIN_MASKED_DIGITS {
        out.push_str(&mask_phone(digits));
    } else {
        out.push_str(digits);
    }
    digits.clear();
}
