//! The module contains the errors the client can surface.
//!
//! Remote failures bubble up unmodified: there are no retries and nothing is
//! suppressed. Local precondition failures (`InvalidAmount`) are raised
//! before any network call is made.

use thiserror::Error;

/// Client custom errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The bearer credential was rejected (401/403) or could not be used.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// The requested resource or uid no longer exists server-side.
    #[error("not found: {0}")]
    NotFound(String),
    /// Server-side failure (5xx) or a transport-level failure.
    #[error("remote service error: {0}")]
    RemoteService(String),
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Local precondition failure; no request was made.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// The server declined a deposit or withdrawal.
    #[error("transfer rejected: {0}")]
    TransferRejected(String),
    /// Writing a downloaded image to disk failed.
    #[error("file write failed: {0}")]
    FileWrite(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else {
            ClientError::RemoteService(err.to_string())
        }
    }
}
