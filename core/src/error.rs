//! Error types for the admin API client.
//!
//! # Design
//! `Unauthorized` gets a dedicated variant because a 401 is handled globally
//! (token cleared, login navigation issued) and callers must treat it as
//! fatal for the operation. Envelope failures keep the server's code and
//! message; non-envelope failures keep the raw status and body for debugging.

use thiserror::Error;

/// Errors returned by `AdminClient::execute` and the building blocks under it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received: connection refused, DNS failure, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered 401. The session token has already been cleared.
    #[error("unauthorized: session expired")]
    Unauthorized,

    /// The server returned an envelope with a non-success code.
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },

    /// The server returned a non-2xx status without a readable envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The persisted client state could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}
