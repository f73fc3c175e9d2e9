//! Herdbook Services - Simulated identification and OTP services.
//!
//! Both services are asynchronous and may be slow; callers bound them with
//! [`with_timeout`].

pub mod error;
pub mod otp;
pub mod profiles;
pub mod scan;
pub mod timeout;

pub use error::{OtpError, ScanError};
pub use otp::{OtpGateway, SimulatedOtpGateway, DEFAULT_OTP_DELAY};
pub use profiles::{
    default_milk_yield, random_milk_yield, BreedProfile, ScanResult, PROFILES, SCAN_OWNER,
};
pub use scan::{Identifier, SimulatedIdentifier, DEFAULT_SCAN_DELAY};
pub use timeout::with_timeout;
