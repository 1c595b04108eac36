//! Response decoding and error classification.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{DtrackError, Result, StatusKind};

/// Header carrying the total number of items behind a paged response
/// (`X-Total-Count`; header names are case-insensitive).
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Out-of-band metadata from a successful response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: u16,
    /// Total item count, when the server reported one.
    pub total_count: Option<u64>,
}

impl ResponseMeta {
    pub(crate) fn from_parts(status: StatusCode, headers: &HeaderMap) -> Self {
        Self {
            status: status.as_u16(),
            total_count: total_count(headers),
        }
    }
}

/// Read the total-count header, ignoring values that are not a count.
pub fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Decode a success body.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(DtrackError::Decode)
}

/// Build the error for a non-2xx response.
///
/// The message comes from a JSON body's `message` (or `error`) field when
/// there is one, and is the status line otherwise.
pub fn classify(status: StatusCode, body: &[u8]) -> DtrackError {
    DtrackError::Http {
        kind: StatusKind::from_status(status.as_u16()),
        status: status.as_u16(),
        message: error_message(status, body),
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
            return err.to_string();
        }
    }

    status.to_string()
}
