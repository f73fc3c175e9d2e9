use std::time::Duration;

use thiserror::Error;

use herdbook_core::ValidationError;

#[derive(Error, Debug, PartialEq)]
pub enum ScanError {
    #[error("No image data supplied")]
    EmptyImage,

    #[error("Identification timed out after {0:?}")]
    Timeout(Duration),

    #[error("Identification failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum OtpError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("OTP service timed out after {0:?}")]
    Timeout(Duration),

    #[error("OTP rejected: {0}")]
    Rejected(String),
}

/// Errors that can represent a call abandoned after a time limit.
pub trait TimedOut {
    fn timed_out(limit: Duration) -> Self;
}

impl TimedOut for ScanError {
    fn timed_out(limit: Duration) -> Self {
        ScanError::Timeout(limit)
    }
}

impl TimedOut for OtpError {
    fn timed_out(limit: Duration) -> Self {
        OtpError::Timeout(limit)
    }
}
