use anyhow::Context;
use dotenvy::dotenv;
use registrar::logging::init_tracing;
use registrar::metrics::{init_metrics, metrics_app};
use registrar::router::init_router;
use registrar::state::init_app_state;
use registrar_config::ServerConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing().context("Failed to initialize tracing")?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await?;

    if !state.service_auth.is_enabled() {
        warn!("INTERNAL_SERVICE_API_KEY not set; internal-service access is disabled");
    }

    if let Some(handle) = init_metrics()? {
        let metrics_listener = tokio::net::TcpListener::bind(server_config.metrics_addr())
            .await
            .context("Failed to bind metrics listener")?;
        info!(addr = %server_config.metrics_addr(), "Metrics available at /metrics");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let listener = tokio::net::TcpListener::bind(server_config.api_addr())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.api_addr()))?;

    info!(addr = %server_config.api_addr(), "Server running");
    info!("Swagger UI at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
