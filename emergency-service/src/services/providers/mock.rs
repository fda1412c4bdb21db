//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Responder = dyn Fn(&str) -> Result<String, ProviderError> + Send + Sync;

/// Scripted text provider for testing.
///
/// Every call is counted, so tests can assert whether the planner reached the
/// provider at all.
pub struct MockTextProvider {
    responder: Box<Responder>,
    delay: Option<Duration>,
    healthy: bool,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Answer every prompt with the output of `responder`.
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, ProviderError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delay: None,
            healthy: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every prompt with the same text.
    pub fn with_response(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::from_fn(move |_| Ok(text.clone()))
    }

    /// Fail every call with a network error.
    pub fn failing() -> Self {
        Self::from_fn(|_| {
            Err(ProviderError::NetworkError(
                "connection refused".to_string(),
            ))
        })
    }

    /// Panic inside `generate`, standing in for a bug below the planner.
    pub fn panicking() -> Self {
        Self::from_fn(|_| panic!("mock provider panicked"))
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail `health_check`, so readiness reports the provider as down.
    pub fn with_unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Number of `generate` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        _system: &str,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let text = (self.responder)(prompt)?;

        Ok(ProviderResponse {
            output_tokens: approx_tokens(&text),
            input_tokens: approx_tokens(prompt),
            text,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ProviderError::NetworkError(
                "mock provider unreachable".to_string(),
            ))
        }
    }
}

/// Rough four-characters-per-token estimate.
fn approx_tokens(text: &str) -> u32 {
    u32::try_from(text.len() / 4).unwrap_or(u32::MAX)
}
