//! Plan generation with a static fallback.
//!
//! [`PlanGenerator::generate_plan`] never fails. The provider is untrusted for
//! both availability and output shape, so every error on that path (transport,
//! timeout, malformed or incomplete JSON) ends in the fallback table.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use validator::Validate;

use crate::config::PlannerConfig;
use crate::models::{EmergencyInput, EmergencyPlan, PlanOutcome, PlanSource};
use crate::services::fallback::FallbackTable;
use crate::services::metrics;
use crate::services::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};

/// Why the provider path did not yield a plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("provider output is not a valid plan: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("provider plan failed validation: {0}")]
    InvalidPlan(#[from] validator::ValidationErrors),
}

impl PlanError {
    /// Short label used for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            PlanError::Provider(e) => e.kind(),
            PlanError::Timeout(_) => "timeout",
            PlanError::MalformedJson(_) => "malformed_json",
            PlanError::InvalidPlan(_) => "invalid_plan",
        }
    }
}

/// Read-only configuration of the planner, built once at startup.
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub system_prompt: String,
    pub fallback: FallbackTable,
    pub params: GenerationParams,
    pub timeout: Duration,
}

impl PlannerSettings {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            fallback: FallbackTable::standard(),
            params: GenerationParams {
                temperature: Some(config.temperature),
                max_tokens: Some(config.max_tokens),
                json_output: true,
            },
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

/// Turns emergency descriptions into response plans.
pub struct PlanGenerator {
    provider: Arc<dyn TextProvider>,
    settings: PlannerSettings,
}

impl PlanGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, settings: PlannerSettings) -> Self {
        Self { provider, settings }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Produce a plan for `input`, from the provider when possible and from
    /// the fallback table otherwise.
    #[tracing::instrument(
        skip(self, input),
        fields(
            emergency_type = %input.emergency_type,
            immediate_danger = input.immediate_danger,
            provider = self.provider.name(),
        )
    )]
    pub async fn generate_plan(&self, input: &EmergencyInput) -> PlanOutcome {
        let emergency_type = input.emergency_type.as_str();

        let outcome = match self.plan_from_provider(input).await {
            Ok(plan) => {
                tracing::info!("Serving provider-generated plan");
                PlanOutcome {
                    plan,
                    source: PlanSource::Ai,
                }
            }
            Err(e) => {
                tracing::warn!(
                    reason = e.reason(),
                    error = %e,
                    "Provider plan unavailable, serving fallback plan"
                );
                metrics::record_fallback(e.reason());
                PlanOutcome {
                    plan: self.settings.fallback.plan_for(input.emergency_type),
                    source: PlanSource::Fallback,
                }
            }
        };

        metrics::record_plan(emergency_type, outcome.source.as_str());
        outcome
    }

    /// One bounded provider attempt followed by parsing and validation.
    async fn plan_from_provider(&self, input: &EmergencyInput) -> Result<EmergencyPlan, PlanError> {
        let prompt = build_prompt(input);
        let provider = self.provider.name();

        let started = Instant::now();
        let result = tokio::time::timeout(
            self.settings.timeout,
            self.provider
                .generate(&self.settings.system_prompt, &prompt, &self.settings.params),
        )
        .await;
        metrics::record_provider_latency(provider, started.elapsed().as_secs_f64());

        let response = match result {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                metrics::record_provider_error(provider, e.kind());
                return Err(e.into());
            }
            Err(_) => {
                metrics::record_provider_error(provider, "timeout");
                return Err(PlanError::Timeout(self.settings.timeout));
            }
        };

        metrics::record_tokens(provider, response.input_tokens, response.output_tokens);
        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            "Provider responded"
        );

        parse_plan(&response.text)
    }
}

/// Parse raw provider text into a validated plan.
pub fn parse_plan(raw: &str) -> Result<EmergencyPlan, PlanError> {
    let plan: EmergencyPlan = serde_json::from_str(raw.trim())?;
    plan.validate()?;
    Ok(plan)
}
