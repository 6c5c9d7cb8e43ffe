//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::MissingToken`] → 400
/// - [`ServiceError::InvalidToken`] → 400
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request carried no token — field absent, `null`, or empty.
    #[error("missing token")]
    MissingToken,

    /// The token failed decryption, or the decrypted path failed safety
    /// validation. The two cases are intentionally indistinguishable.
    #[error("invalid token")]
    InvalidToken,

    /// An unexpected internal error occurred (e.g. unreadable request body).
    #[error("internal")]
    Internal,
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::MissingToken => 400,
            ServiceError::InvalidToken => 400,
            ServiceError::Internal => 500,
        }
    }
}
