use axum::{http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::config::Config;
use crate::voice_client::ElevenLabsClient;

/// Shared, read-only application state.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for placing calls through ElevenLabs.
    pub voice_client: ElevenLabsClient,
}

impl AppState {
    /// Build the state from configuration, creating the outbound client.
    pub fn from_config(config: Config) -> Result<Self, crate::errors::AppError> {
        let voice_client = ElevenLabsClient::new(
            config.elevenlabs_base_url.clone(),
            config.xi_api_key.clone(),
            config.elevenlabs_timeout(),
        )?;

        Ok(Self {
            config,
            voice_client,
        })
    }
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with `ok` and an
///   ISO 8601 timestamp.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "ok": true,
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })),
    )
}
