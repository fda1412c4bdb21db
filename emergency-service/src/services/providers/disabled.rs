//! Provider used when no completion backend is configured.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// Refuses every completion so the planner always serves fallback plans.
pub struct DisabledTextProvider;

#[async_trait]
impl TextProvider for DisabledTextProvider {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn generate(
        &self,
        _system: &str,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured(
            "No completion provider configured".to_string(),
        ))
    }

    // Fallback-only operation is a healthy state.
    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
