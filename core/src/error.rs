//! Error types for the todo client and the mutation flows.
//!
//! # Design
//! Three layers, each with its own type:
//! - `ApiError`: what the remote service or the transport did wrong. `NotFound`
//!   gets a dedicated variant; every other unexpected status lands in
//!   `HttpError` with the raw status and body for debugging.
//! - `FlowError`: what a mutation flow re-signals to its caller after it has
//!   already surfaced a message to the user.
//! - `ErrorMessage`: the fixed set of user-facing texts shown in the banner.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    TransportError(String),
}

/// Failure re-signalled by a flow to its caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("title should not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Service(#[from] ApiError),

    /// Some of the independent requests of a bulk flow failed.
    #[error("{failed} of {attempted} requests failed")]
    Partial { failed: usize, attempted: usize },

    /// A fanned-out request task ended without settling (panicked or was
    /// cancelled).
    #[error("bulk operation interrupted: {0}")]
    Interrupted(String),
}

/// User-facing error banner text.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ErrorMessage {
    #[error("Unable to load todos")]
    Load,
    #[error("Title should not be empty")]
    EmptyTitle,
    #[error("Unable to add a todo")]
    Add,
    #[error("Unable to update a todo")]
    Update,
    #[error("Unable to delete a todo")]
    Delete,
    #[error("Some todos could not be updated")]
    PartialUpdate,
    #[error("Some todos could not be deleted")]
    PartialDelete,
    #[error("Error updating todos")]
    BulkUpdate,
}
