//! Raw responses for callers that branch on status.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, Error};

/// The status and (if any) JSON body of a response.
///
/// Returned by entry points whose callers decide success from the status
/// code: the credential exchange and unauthenticated calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Build from raw bytes, keeping the body only when it parses as JSON.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(bytes).ok()
        };
        Self { status, body }
    }

    /// True for exactly `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| DecodeError::new(self.context(), "empty or non-JSON body"))?;
        serde_json::from_value(body)
            .map_err(|e| DecodeError::new(self.context(), e.to_string()).into())
    }

    fn context(&self) -> String {
        format!("HTTP {}", self.status)
    }
}
