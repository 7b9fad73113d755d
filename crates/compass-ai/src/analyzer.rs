use anyhow::Result;
use async_trait::async_trait;

/// Positioning analyzer trait (supports swapping completion vendors).
#[async_trait]
pub trait PositioningAnalyzer: Send + Sync {
    /// Completion vendor name.
    fn provider(&self) -> &str;

    /// Model identifier sent with every request.
    fn model_name(&self) -> &str;

    /// Generate a market-positioning paragraph for one competitor.
    ///
    /// Returns the trimmed completion text. Transport, auth and rate-limit
    /// failures propagate unchanged to the caller; there is no retry.
    async fn analyze(&self, competitor_name: &str) -> Result<String>;
}
