//! Error types for the storefront API client.
//!
//! # Design
//! Every non-2xx response becomes `ApiError::Http` carrying the numeric status
//! and its reason phrase. The response body is dropped, even when the backend
//! put an error message in it. Transport and (de)serialization failures keep
//! their own variants so callers can tell a rejected request from one that
//! never completed.

use thiserror::Error;

/// A non-2xx response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    /// Status text of the response, e.g. `Not Found`.
    pub message: String,
    pub status: u16,
}

/// Errors returned by `StorefrontClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request never produced a response (DNS, refused connection, bad URL).
    #[error("transport failed: {0}")]
    Transport(String),

    /// A 2xx response body was not the JSON the operation expected.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An auth response carried an access token but no `user.id` to store
    /// alongside it.
    #[error("auth response has an access token but no user id")]
    IncompleteAuth,
}

impl ApiError {
    /// HTTP status code when the backend rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(err) => Some(err.status),
            _ => None,
        }
    }
}
