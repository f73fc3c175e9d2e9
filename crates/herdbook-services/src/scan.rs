use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ScanError;
use crate::profiles::{ScanResult, PROFILES};

/// Default latency of the simulated identification service.
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(3000);

/// Trait for identifying an animal from an iris image.
pub trait Identifier: Send + Sync {
    fn identify(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<ScanResult, ScanError>> + Send;
}

/// Stand-in identification service: waits `delay`, then reports one of the
/// known breed profiles chosen at random. The image content is not inspected.
pub struct SimulatedIdentifier {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl SimulatedIdentifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic breed selection for tests.
    pub fn with_seed(delay: Duration, seed: u64) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick_profile(&self) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..PROFILES.len())
    }
}

impl Default for SimulatedIdentifier {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_DELAY)
    }
}

impl Identifier for SimulatedIdentifier {
    async fn identify(&self, image: &[u8]) -> Result<ScanResult, ScanError> {
        if image.is_empty() {
            return Err(ScanError::EmptyImage);
        }

        tracing::debug!("Identifying image of {} bytes", image.len());
        tokio::time::sleep(self.delay).await;

        let profile = &PROFILES[self.pick_profile()];
        let result = profile.to_result(Utc::now().timestamp_millis());
        tracing::info!(
            "Identified {} ({}%) as {}",
            result.breed,
            result.confidence,
            result.animal_id
        );
        Ok(result)
    }
}
