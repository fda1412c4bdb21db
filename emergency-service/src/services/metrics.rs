//! Prometheus metrics for emergency-service.
//!
//! HTTP traffic, plan sources and provider health.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static HTTP_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static HTTP_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// Plan metrics
pub static PLAN_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PLAN_FALLBACKS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static ESCALATIONS_TOTAL: OnceLock<IntCounter> = OnceLock::new();

// Provider metrics
pub static LLM_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static LLM_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static LLM_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let http_requests_total = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("Failed to create http_requests_total metric");

    let http_request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "path"],
    )
    .expect("Failed to create http_request_duration_seconds metric");

    // source: ai, fallback
    let plan_requests = IntCounterVec::new(
        Opts::new("plan_requests_total", "Total plans served"),
        &["emergency_type", "source"],
    )
    .expect("Failed to create plan_requests_total metric");

    let plan_fallbacks = IntCounterVec::new(
        Opts::new("plan_fallbacks_total", "Plans served from the fallback table"),
        &["reason"],
    )
    .expect("Failed to create plan_fallbacks_total metric");

    let escalations = IntCounter::new("escalations_total", "Total escalation requests")
        .expect("Failed to create escalations_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "llm_provider_latency_seconds",
            "Completion provider latency in seconds",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 15.0, 30.0]),
        &["provider"],
    )
    .expect("Failed to create llm_provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("llm_provider_errors_total", "Total completion provider errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create llm_provider_errors_total metric");

    let tokens = IntCounterVec::new(
        Opts::new("llm_tokens_total", "Total tokens processed"),
        &["provider", "type"], // type: input, output
    )
    .expect("Failed to create llm_tokens_total metric");

    registry
        .register(Box::new(http_requests_total.clone()))
        .expect("Failed to register http_requests_total");
    registry
        .register(Box::new(http_request_duration.clone()))
        .expect("Failed to register http_request_duration_seconds");
    registry
        .register(Box::new(plan_requests.clone()))
        .expect("Failed to register plan_requests_total");
    registry
        .register(Box::new(plan_fallbacks.clone()))
        .expect("Failed to register plan_fallbacks_total");
    registry
        .register(Box::new(escalations.clone()))
        .expect("Failed to register escalations_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register llm_provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register llm_provider_errors_total");
    registry
        .register(Box::new(tokens.clone()))
        .expect("Failed to register llm_tokens_total");

    // Another thread may have won the race; its registry stays authoritative.
    if REGISTRY.set(registry).is_err() {
        return;
    }
    let _ = HTTP_REQUESTS_TOTAL.set(http_requests_total);
    let _ = HTTP_REQUEST_DURATION_SECONDS.set(http_request_duration);
    let _ = PLAN_REQUESTS_TOTAL.set(plan_requests);
    let _ = PLAN_FALLBACKS_TOTAL.set(plan_fallbacks);
    let _ = ESCALATIONS_TOTAL.set(escalations);
    let _ = LLM_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = LLM_PROVIDER_ERRORS_TOTAL.set(provider_errors);
    let _ = LLM_TOKENS_TOTAL.set(tokens);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(counter) = HTTP_REQUESTS_TOTAL.get() {
        let status = status.to_string();
        counter
            .with_label_values(&[method, path, status.as_str()])
            .inc();
    }
    if let Some(histogram) = HTTP_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// Record a served plan and where it came from.
pub fn record_plan(emergency_type: &str, source: &str) {
    if let Some(counter) = PLAN_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[emergency_type, source]).inc();
    }
}

/// Record why a request fell back to the static table.
pub fn record_fallback(reason: &str) {
    if let Some(counter) = PLAN_FALLBACKS_TOTAL.get() {
        counter.with_label_values(&[reason]).inc();
    }
}

/// Record an escalation request.
pub fn record_escalation() {
    if let Some(counter) = ESCALATIONS_TOTAL.get() {
        counter.inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, duration_secs: f64) {
    if let Some(histogram) = LLM_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = LLM_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}

/// Record token usage reported by the provider.
pub fn record_tokens(provider: &str, input_tokens: u32, output_tokens: u32) {
    if let Some(counter) = LLM_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[provider, "input"])
            .inc_by(u64::from(input_tokens));
        counter
            .with_label_values(&[provider, "output"])
            .inc_by(u64::from(output_tokens));
    }
}
