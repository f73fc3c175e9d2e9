use std::future::Future;
use std::time::Duration;

use crate::error::TimedOut;

/// Await `call`, giving up after `limit`. The abandoned call is dropped.
pub async fn with_timeout<F, T, E>(limit: Duration, call: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: TimedOut,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Service call timed out after {:?}", limit);
            Err(E::timed_out(limit))
        }
    }
}
