use crate::animal::{AnimalPatch, NewAnimal};
use crate::error::ValidationError;

/// Validator for user input, applied before any store or service call.
pub struct Validator;

impl Validator {
    /// Validate a phone number.
    /// Must be 10 ASCII digits, the first one between 6 and 9.
    pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
        if phone.is_empty() {
            return Err(ValidationError::PhoneRequired);
        }
        let bytes = phone.as_bytes();
        let valid = bytes.len() == 10
            && (b'6'..=b'9').contains(&bytes[0])
            && bytes.iter().all(u8::is_ascii_digit);
        if !valid {
            return Err(ValidationError::InvalidPhone(phone.to_string()));
        }
        Ok(())
    }

    /// Validate a one-time password: exactly six ASCII digits.
    pub fn validate_otp(otp: &str) -> Result<(), ValidationError> {
        if otp.is_empty() {
            return Err(ValidationError::OtpRequired);
        }
        if otp.len() != 6 || !otp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidOtp);
        }
        Ok(())
    }

    pub fn validate_milk_yield(milk_yield: Option<f64>) -> Result<(), ValidationError> {
        if let Some(y) = milk_yield {
            if !y.is_finite() {
                return Err(ValidationError::MilkYieldNotFinite);
            }
            if y < 0.0 {
                return Err(ValidationError::MilkYieldNegative(y));
            }
        }
        Ok(())
    }

    pub fn validate_new_animal(data: &NewAnimal) -> Result<(), ValidationError> {
        Self::validate_milk_yield(data.milk_yield)
    }

    pub fn validate_patch(patch: &AnimalPatch) -> Result<(), ValidationError> {
        Self::validate_milk_yield(patch.milk_yield)
    }
}
