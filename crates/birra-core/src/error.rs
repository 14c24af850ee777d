//! Error types for the birra client.
//!
//! One error type covers the whole workspace, with explicit variants for
//! transport, authentication, decoding, storage, and input validation so
//! callers can route on the failure kind.

use std::fmt;
use thiserror::Error;

/// The unified error type for birra operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, client failures).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The backend answered without the expected success marker.
    #[error("request rejected: {0}")]
    Rejected(#[from] RejectedError),

    /// Session storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, method, JSON body, access token).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true when the session is gone and the user must sign in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Auth(AuthError::SessionExpired))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential exchange was rejected.
    #[error("invalid credentials (HTTP {status})")]
    InvalidCredentials { status: u16 },

    /// The refresh token was rejected or missing; the session is gone.
    #[error("session expired")]
    SessionExpired,
}

/// A response body that is not the JSON we expected.
#[derive(Debug, Error)]
#[error("{context}: {message}")]
pub struct DecodeError {
    /// Where the body came from (an HTTP status or an endpoint).
    pub context: String,
    /// Decoder message.
    pub message: String,
}

impl DecodeError {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// A decoded body that lacks the field marking success.
#[derive(Debug)]
pub struct RejectedError {
    /// The endpoint that was called.
    pub endpoint: String,
    /// The decoded body, as returned by the backend.
    pub body: serde_json::Value,
}

impl fmt::Display for RejectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} answered {}", self.endpoint, self.body)
    }
}

impl std::error::Error for RejectedError {}

impl RejectedError {
    pub fn new(endpoint: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            body,
        }
    }
}

/// Session storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("IO error: {message}")]
    Io { message: String },

    /// A stored entry is not valid JSON for its key.
    #[error("corrupt entry '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Unknown HTTP method.
    #[error("unsupported method '{value}'")]
    Method { value: String },

    /// A request body could not be encoded or parsed.
    #[error("invalid body: {message}")]
    Body { message: String },

    /// An access token that cannot be sent in an `Authorization` header.
    #[error("invalid access token: {reason}")]
    AccessToken { reason: String },
}
