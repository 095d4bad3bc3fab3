//! Error types for the groceteria client.
//!
//! # Design
//! `NotFound` keeps its own variant because hosts routinely tell "the record
//! is gone" apart from "the server said no". Every other non-success status
//! lands in `HttpError` with the raw status and body; the backend's error
//! payloads are not interpreted further.

use thiserror::Error;

/// Errors returned by `GroceteriaClient` parse methods and the item list view.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors raised by `KeyValueStore` implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A category selector value that is neither the sentinel nor a known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);
