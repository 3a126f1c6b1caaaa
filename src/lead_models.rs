use std::collections::{BTreeMap, HashMap};

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::phone::normalize_phone;

/// Name fields, highest priority first.
pub const NAME_FIELDS: &[&str] = &["name", "fullname", "first_name"];

/// Phone fields, highest priority first.
pub const PHONE_FIELDS: &[&str] = &["phone", "phonenumber", "mobile", "tel"];

/// Name used when the form carries none.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Flattened form submission: field name → submitted value.
///
/// Elementor posts either JSON or urlencoded forms; both end up here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeadFields(BTreeMap<String, String>);

impl LeadFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Build from a decoded JSON object, keeping scalar values only.
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let mut fields = Self::new();
        for (key, value) in object {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => continue,
            };
            fields.insert(key, text);
        }
        fields
    }

    /// First non-empty name alias, or `"Unknown"`.
    pub fn name(&self) -> String {
        first_present(self, NAME_FIELDS)
            .unwrap_or(UNKNOWN_NAME)
            .to_string()
    }

    /// First non-empty phone alias, unnormalized.
    pub fn raw_phone(&self) -> Option<&str> {
        first_present(self, PHONE_FIELDS)
    }
}

impl<K, V> FromIterator<(K, V)> for LeadFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// Return the first alias whose value is non-empty after trimming.
///
/// The returned value is trimmed. Aliases are checked in slice order.
pub fn first_present<'a>(fields: &'a LeadFields, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| fields.get(alias))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

#[async_trait]
impl<S> FromRequest<S> for LeadFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
            // An empty JSON body is an empty submission
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::new());
            }
            let object: Map<String, Value> = serde_json::from_slice(&bytes)
                .map_err(|e| AppError::MalformedBody(e.to_string()))?;
            return Ok(Self::from_json_object(object));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(map) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;
            return Ok(map.into_iter().collect());
        }

        // Anything else is read as an empty submission
        tracing::debug!("Unsupported content type '{}', treating body as empty", content_type);
        Ok(Self::new())
    }
}

/// A validated lead, ready to be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub name: String,
    pub raw_phone: String,
    /// E.164
    pub normalized_phone: String,
}

impl LeadSubmission {
    /// Derive name and phone from the submitted fields and normalize the phone.
    pub fn from_fields(fields: &LeadFields) -> Result<Self, AppError> {
        let raw_phone = fields.raw_phone().ok_or(AppError::MissingPhone)?;

        let normalized_phone =
            normalize_phone(raw_phone).ok_or_else(|| AppError::InvalidPhone(raw_phone.to_string()))?;

        Ok(Self {
            name: fields.name(),
            raw_phone: raw_phone.to_string(),
            normalized_phone,
        })
    }
}

/// Response body for an accepted lead.
#[derive(Debug, Serialize)]
pub struct LeadCallResponse {
    pub success: bool,
    /// Normalized number that was dialed.
    pub called: String,
    pub agent: String,
}
