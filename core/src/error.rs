//! Error types for the task-list API client.
//!
//! `NotFound` and `Validation` carry the server's `{message}` text because
//! callers usually show it. Any other non-success response lands in
//! `HttpError` with the raw status and body.

use thiserror::Error;

/// Errors returned by `TaskListClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered 400, e.g. an empty list name or todo title.
    #[error("rejected: {0}")]
    Validation(String),

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
