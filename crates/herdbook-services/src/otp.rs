use std::collections::HashSet;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use herdbook_core::Validator;

use crate::error::OtpError;

/// Default latency of the simulated OTP gateway.
pub const DEFAULT_OTP_DELAY: Duration = Duration::from_millis(1000);

/// Trait for delivering and checking one-time passwords.
pub trait OtpGateway: Send + Sync {
    fn send_otp(&self, phone: &str) -> impl Future<Output = Result<(), OtpError>> + Send;

    fn verify_otp(
        &self,
        phone: &str,
        otp: &str,
    ) -> impl Future<Output = Result<(), OtpError>> + Send;
}

/// Stand-in gateway. Sending only records the phone number; any
/// well-formed six-digit code is accepted for a number that was sent one.
pub struct SimulatedOtpGateway {
    delay: Duration,
    pending: Mutex<HashSet<String>>,
}

impl SimulatedOtpGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashSet::new()),
        }
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SimulatedOtpGateway {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_DELAY)
    }
}

impl OtpGateway for SimulatedOtpGateway {
    async fn send_otp(&self, phone: &str) -> Result<(), OtpError> {
        Validator::validate_phone(phone)?;
        tokio::time::sleep(self.delay).await;

        self.pending().insert(phone.to_string());
        tracing::info!("OTP sent to number ending {}", &phone[phone.len() - 4..]);
        Ok(())
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<(), OtpError> {
        Validator::validate_phone(phone)?;
        Validator::validate_otp(otp)?;
        tokio::time::sleep(self.delay).await;

        if !self.pending().remove(phone) {
            return Err(OtpError::Rejected("no OTP was sent to this number".to_string()));
        }
        Ok(())
    }
}
