//! Elementor Caller Library
//!
//! Receives lead webhooks from Elementor forms, normalizes the submitted
//! phone number to E.164 and asks an ElevenLabs conversational agent to call
//! the lead.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Lead validation logic.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: Application state and health check.
//! - `lead_handler`: Elementor lead webhook handler.
//! - `lead_models`: Inbound lead fields and response models.
//! - `phone`: Phone normalization.
//! - `voice_client`: ElevenLabs outbound call client.

pub mod api;
pub mod core;
pub mod integrations;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod lead_handler;
pub mod lead_models;
pub mod phone;
pub mod voice_client;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::AppState;

/// Largest accepted webhook body.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the HTTP router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/elementor/lead", post(lead_handler::elementor_lead))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(CorsLayer::permissive()),
        )
}
