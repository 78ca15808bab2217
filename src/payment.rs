use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::PaymentError;

/// Single-shot asynchronous charge. The storefront never retries or
/// cancels; the error variant exists so a real backend can slot in without
/// changing the session's interface.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, amount: f64) -> Result<(), PaymentError>;
}

/// The demo gateway: a fixed delay followed by an unconditional success.
pub struct FixedDelayGateway {
    delay: Duration,
}

impl FixedDelayGateway {
    /// Delay the original storefront simulates before confirming payment.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelayGateway {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl PaymentGateway for FixedDelayGateway {
    async fn charge(&self, amount: f64) -> Result<(), PaymentError> {
        info!(amount = %amount, delay_ms = self.delay.as_millis() as u64, "Simulating payment");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
