//! Text-completion provider abstractions and implementations.
//!
//! The plan generator only ever sees [`TextProvider`], so backends (an
//! OpenAI-compatible endpoint, Gemini, a disabled provider, test mocks) can be
//! swapped without touching the fallback logic.

pub mod disabled;
pub mod gemini;
pub mod mock;
pub mod openai;

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{LlmConfig, ProviderKind};

/// Timeout applied by the HTTP clients themselves. The planner enforces its
/// own, usually tighter, bound on top of this.
pub(crate) const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// Map a non-success HTTP status from a provider API.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> ProviderError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ProviderError::RateLimited;
    }
    ProviderError::ApiError(format!("{} API error {}: {}", provider, status, body))
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: u32,

    /// Output tokens generated.
    pub output_tokens: u32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Generation parameters for completion requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<u32>,

    /// Ask the backend for a JSON response where it supports that natively.
    pub json_output: bool,
}

/// A text-completion backend.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Complete `prompt` under the given system instruction.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// Build the provider selected in configuration.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn TextProvider>, ProviderError> {
    let provider: Arc<dyn TextProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(openai::OpenAiTextProvider::new(openai::OpenAiConfig {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })?),
        ProviderKind::Gemini => Arc::new(gemini::GeminiTextProvider::new(gemini::GeminiConfig {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })?),
        ProviderKind::Disabled => Arc::new(disabled::DisabledTextProvider),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_rate_limited() {
        let err = status_error("OpenAI", StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[test]
    fn other_statuses_keep_the_body() {
        let err = status_error("Gemini", StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.kind(), "api_error");
        assert!(err.to_string().contains("upstream down"));
    }
}
