use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::phone::mask_phone;

/// Application-specific error types.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone)]
pub enum AppError {
    /// None of the phone field aliases carried a value.
    MissingPhone,
    /// The phone value could not be normalized to a valid E.164 number.
    InvalidPhone(String),
    /// The request body could not be decoded.
    MalformedBody(String),
    /// Calling the voice API failed (network, timeout or non-2xx).
    UpstreamError(String),
}

impl AppError {
    /// Message returned to the caller. Never includes upstream detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingPhone => "Phone number required",
            AppError::InvalidPhone(_) => "Invalid phone number",
            AppError::MalformedBody(_) => "Invalid request body",
            AppError::UpstreamError(_) => "Internal error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingPhone | AppError::InvalidPhone(_) | AppError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingPhone => write!(f, "Missing phone: no phone field in submission"),
            AppError::InvalidPhone(raw) => {
                write!(f, "Invalid phone: '{}' is not a valid number", mask_phone(raw))
            }
            AppError::MalformedBody(msg) => write!(f, "Malformed body: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to its status code and fixed JSON message.
    /// Full detail goes to the log only.
    fn into_response(self) -> Response {
        match &self {
            AppError::UpstreamError(msg) => {
                tracing::error!("[SERVER ERROR] {}", msg);
            }
            other => {
                tracing::warn!("[ERROR] {}", other);
            }
        }

        let body = Json(json!({
            "error": self.public_message(),
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}
