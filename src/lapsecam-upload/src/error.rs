//! Upload error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("http transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upload rejected with http status {0}")]
    Status(u16),
}

impl TransportError {
    /// Numeric code recorded in the wake outcome: the HTTP status when one
    /// was received, 0 for a transport-level failure.
    pub fn code(&self) -> u16 {
        match self {
            TransportError::Http(_) => 0,
            TransportError::Status(code) => *code,
        }
    }
}
