use crate::{BarHistory, SignalError};
use async_trait::async_trait;

/// Source of daily bar histories. The engine receives either a valid
/// history or an explicit error per symbol; retries live behind this trait.
#[async_trait]
pub trait BarSource: Send + Sync {
    async fn daily_history(&self, symbol: &str) -> Result<BarHistory, SignalError>;
}
