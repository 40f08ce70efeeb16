//! Response payloads and the presigned-link convention
//!
//! Some endpoints answer with the requested data, others with a small
//! descriptor `{ "link": ..., "expires": ... }` pointing at short-lived
//! storage. [`LinkedResponse`] makes that split explicit; it is resolved in a
//! single step by the client based on the endpoint's declared
//! [`ResponseKind`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{ApiError, Result};

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON-typed response, parsed
    Json(Value),
    /// Anything else, as text
    Text(String),
}

impl Payload {
    /// Decode a body according to its content type.
    ///
    /// `application/json` and `+json` types are parsed; everything else is
    /// kept as text.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] if a JSON-typed body is malformed.
    pub fn from_body(content_type: Option<&str>, body: String) -> Result<Self> {
        if is_json_content_type(content_type) {
            serde_json::from_str(&body).map(Payload::Json).map_err(|e| ApiError::Parse {
                context: "JSON response body".to_string(),
                details: e.to_string(),
            })
        } else {
            Ok(Payload::Text(body))
        }
    }

    /// Parsed JSON, if this is a JSON payload.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Raw text, if this is a text payload.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }

    /// Consume into a JSON value; text payloads become JSON strings.
    pub fn into_json(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        }
    }

    /// Deserialize into a typed response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload does not match `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let value = match self {
            Payload::Json(value) => value.clone(),
            Payload::Text(_) => {
                return Err(ApiError::validation(
                    "Response shape",
                    "expected a JSON payload, received text",
                ));
            }
        };

        serde_json::from_value(value).map_err(|e| ApiError::validation("Response shape", e.to_string()))
    }
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Whether an endpoint answers with data or with a presigned link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ResponseKind {
    /// Payload is returned inline
    Direct,
    /// Payload must be fetched from a presigned link
    Linked,
}

/// Presigned link descriptor, in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedLink {
    /// Short-lived storage URL
    pub link: String,
    /// Upstream-declared expiry, when it could be read
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

impl PresignedLink {
    /// Read a link descriptor out of a first-hop payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] if the payload has no string `link` field.
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let link = payload
            .as_json()
            .and_then(|value| value.get("link"))
            .and_then(Value::as_str)
            .filter(|link| !link.is_empty())
            .ok_or_else(|| ApiError::protocol("no presigned link received"))?;

        let expires = match payload.as_json().and_then(|value| value.get("expires")) {
            Some(Value::String(raw)) => match DateTime::parse_from_rfc3339(raw) {
                Ok(parsed) => Some(parsed.with_timezone(&Utc)),
                Err(e) => {
                    warn!(expires = %raw, error = %e, "Unreadable presigned link expiry");
                    None
                }
            },
            _ => {
                warn!(link = %link, "Presigned link without expiry");
                None
            }
        };

        Ok(Self { link: link.to_string(), expires })
    }

    /// Instant after which a cached copy must not be served.
    ///
    /// `None` when there is no expiry or the margin reaches past the
    /// representable range.
    pub fn cache_until(&self, margin: chrono::TimeDelta) -> Option<DateTime<Utc>> {
        self.expires.and_then(|expires| expires.checked_sub_signed(margin))
    }
}

/// First-hop response, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkedResponse {
    /// Data returned inline
    Direct(Payload),
    /// Data must be fetched from the link
    Link(PresignedLink),
}

impl LinkedResponse {
    /// Classify a first-hop payload according to the declared response kind.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] if a linked endpoint did not answer with
    /// a link descriptor.
    pub fn classify(payload: Payload, kind: ResponseKind) -> Result<Self> {
        match kind {
            ResponseKind::Direct => Ok(LinkedResponse::Direct(payload)),
            ResponseKind::Linked => PresignedLink::from_payload(&payload).map(LinkedResponse::Link),
        }
    }
}
