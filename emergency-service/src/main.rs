use anyhow::Context;
use emergency_service::config::EmergencyConfig;
use emergency_service::handlers::health::SERVICE_NAME;
use emergency_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = EmergencyConfig::load().context("Failed to load configuration")?;

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Failed to build application: {}", e)
    })?;

    app.run_until_stopped()
        .await
        .context("Emergency service stopped with an error")?;

    tracing::info!("Emergency service shut down");
    Ok(())
}
