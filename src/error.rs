use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Failure of an admin API operation.
///
/// Server rejections keep the response body exactly as the backend sent it so
/// callers can render it however they like.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("server responded with status {status}: {body}")]
    Server { status: StatusCode, body: Value },
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("credential contains characters that cannot be sent in a header")]
    InvalidCredential,
    #[error("identifier {0:?} cannot be used as a path segment")]
    InvalidIdentifier(String),
}

impl AdminError {
    pub fn server(status: StatusCode, body: Value) -> Self {
        Self::Server { status, body }
    }

    /// HTTP status of a server rejection, if this error is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
