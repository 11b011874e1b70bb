//! Transport seam between the console and the CRM API.
//!
//! The frontend implements [`ApiClient`] on top of the browser fetch API; the
//! onboarding pipeline only ever sees this trait, so tests drive it with an
//! in-memory fake. All paths are relative to [`API_PREFIX`].

use crate::model::multipart::MultipartForm;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Prefix under which the console server relays requests to the CRM API.
pub const API_PREFIX: &str = "/api";

pub mod paths {
    pub const LOGIN: &str = "/auth/login";
    pub const CREATE_USER: &str = "/users/create";
    pub const OCR_EXTRACT: &str = "/ocr/extract";
    pub const LEAD_PAN_VERIFY: &str = "/kyc/pan-verify";
    /// Assumed: the CRM API publishes no lead Aadhaar lookup, so this mirrors
    /// the PAN route's naming.
    pub const LEAD_AADHAAR_VERIFY: &str = "/kyc/aadhaar-verify";
    pub const DEALER_AADHAAR_OCR: &str = "/dealers/kyc/ocr/aadhaar";
    pub const DEALER_AADHAAR_VERIFY: &str = "/dealers/kyc/verify-aadhaar";
    pub const DEALER_PAN_VERIFY: &str = "/dealers/kyc/verify-pan";
    pub const DEALER_GST_VERIFY: &str = "/dealers/kyc/verify-gst";
    pub const DEALER_BANK_VERIFY: &str = "/dealers/kyc/verify-bank";
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[async_trait(?Send)]
pub trait ApiClient {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError>;

    async fn post_multipart(&self, path: &str, form: MultipartForm) -> Result<Value, ClientError>;
}

pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

pub fn encode<T: serde::Serialize>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Extracts a readable message from an error body.
///
/// The API answers with `{"message": "..."}` or `{"message": ["...", "..."]}`;
/// anything else is returned trimmed as-is.
pub fn server_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| match json.get("message")? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        });
    message.unwrap_or_else(|| body.trim().to_string())
}
