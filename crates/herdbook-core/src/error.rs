use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Invalid phone number {0}: must be a valid 10-digit Indian phone number")]
    InvalidPhone(String),

    #[error("OTP is required")]
    OtpRequired,

    #[error("OTP must be 6 digits")]
    InvalidOtp,

    #[error("Invalid milk yield {0}: must not be negative")]
    MilkYieldNegative(f64),

    #[error("Invalid milk yield: must be a finite number")]
    MilkYieldNotFinite,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}
