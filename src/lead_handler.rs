use crate::errors::AppError;
use crate::handlers::AppState;
use crate::lead_models::{LeadCallResponse, LeadFields, LeadSubmission};
use crate::phone::mask_phone;
use crate::voice_client::OutboundCallRequest;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Elementor lead webhook.
///
/// Picks a name and phone out of the form fields, normalizes the phone to
/// E.164 and asks the configured ElevenLabs agent to call it.
///
/// Flow:
/// 1. Extract fields (JSON or urlencoded body).
/// 2. Reject when no phone alias carries a value (400).
/// 3. Reject when the phone does not normalize (400).
/// 4. Place exactly one outbound call; any failure is a 500.
pub async fn elementor_lead(
    State(state): State<Arc<AppState>>,
    fields: LeadFields,
) -> Result<Json<LeadCallResponse>, AppError> {
    let log_payloads = state.config.log_lead_payloads;

    if log_payloads {
        tracing::info!(
            "[ELEMENTOR] Incoming body: {}",
            serde_json::to_string(&fields).unwrap_or_default()
        );
    } else {
        tracing::info!(
            "[ELEMENTOR] Incoming lead with fields: [{}]",
            fields.keys().collect::<Vec<_>>().join(", ")
        );
    }

    let lead = LeadSubmission::from_fields(&fields)?;

    if log_payloads {
        tracing::info!("[OK] Normalized phone: {} → {}", lead.raw_phone, lead.normalized_phone);
    } else {
        tracing::info!("[OK] Normalized phone: {}", mask_phone(&lead.normalized_phone));
    }

    let agent_id = state.config.elevenlabs_agent_id.as_str();
    let payload = OutboundCallRequest::new(&lead.normalized_phone, &lead.name);

    if log_payloads {
        tracing::info!(
            "[ELEVENLABS PAYLOAD] {}",
            serde_json::to_string(&payload).unwrap_or_default()
        );
    }

    let response = state
        .voice_client
        .start_outbound_call(agent_id, &payload)
        .await?;

    if log_payloads {
        tracing::info!("[ELEVENLABS RESPONSE] {}", response);
    } else {
        tracing::info!("[ELEVENLABS RESPONSE] call accepted for agent {}", agent_id);
    }

    Ok(Json(LeadCallResponse {
        success: true,
        called: lead.normalized_phone,
        agent: agent_id.to_string(),
    }))
}
