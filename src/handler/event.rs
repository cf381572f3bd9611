use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::{BillError, InvoiceRequest};

/// Incoming trigger event. `body` is either the JSON text of the request or
/// an already decoded JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub body: Option<Value>,
}

impl Event {
    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    /// An event whose body is raw text, as HTTP gateways deliver it.
    pub fn from_text(body: impl Into<String>) -> Self {
        Self::new(Value::String(body.into()))
    }

    /// Decode the body into a request.
    ///
    /// A missing, null or empty body is [`BillError::NoData`]; text that is not
    /// JSON is [`BillError::InvalidJson`]; JSON of the wrong shape is
    /// [`BillError::InvalidRequest`].
    pub fn request(&self) -> Result<InvoiceRequest, BillError> {
        match &self.body {
            None | Some(Value::Null) => Err(BillError::NoData),
            Some(Value::String(text)) if text.is_empty() => Err(BillError::NoData),
            Some(Value::String(text)) => {
                let value: Value =
                    serde_json::from_str(text).map_err(|_| BillError::InvalidJson)?;
                parse_request(value)
            }
            Some(value) => parse_request(value.clone()),
        }
    }
}

/// Convert a decoded JSON value into a request.
pub fn parse_request(value: Value) -> Result<InvoiceRequest, BillError> {
    serde_json::from_value(value).map_err(|e| BillError::InvalidRequest(e.to_string()))
}

/// Response returned to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_base64_encoded: Option<bool>,
}

impl Response {
    pub fn json(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            headers: None,
            body: body.to_string(),
            is_base64_encoded: None,
        }
    }

    /// `{"error": ...}` with the status the error maps to.
    pub fn error(error: &BillError) -> Self {
        Self::json(error.status_code(), &json!({ "error": error.to_string() }))
    }

    /// `200 {"url": ...}` for a stored document.
    pub fn link(url: &str) -> Self {
        Self::json(200, &json!({ "url": url }))
    }

    /// The document itself, base64 encoded, offered as a download.
    pub fn attachment(pdf: &[u8], filename: &str) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{filename}\""),
            ),
        ]);
        Self {
            status_code: 200,
            headers: Some(headers),
            body: STANDARD.encode(pdf),
            is_base64_encoded: Some(true),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
