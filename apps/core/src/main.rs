// RuleCheck Backend Entry Point
// Serves the analysis pipeline over HTTP for the upload dashboard.

use anyhow::Context;
use rulecheck_core::config::{AnalyzerConfig, ServerConfig};
use rulecheck_core::{server, telemetry, Analyzer};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    dotenv::dotenv().ok();

    let server_config = ServerConfig::from_env().context("failed to read server configuration")?;
    telemetry::init_tracing(server_config.log_format)?;

    let config = AnalyzerConfig::from_env().context("failed to read analyzer configuration")?;
    info!(
        model = %config.model,
        api_url = %config.api_url,
        score_policy = %config.score_policy,
        "analyzer configured"
    );
    if config.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set; analysis requests will fail until it is configured");
    }

    let analyzer = Analyzer::from_config(&config)?;
    let app = server::router(analyzer);

    let listener = TcpListener::bind(server_config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", server_config.listen_addr))?;
    info!(addr = %server_config.listen_addr, "rulecheck listening");

    server::serve(listener, app, wait_for_shutdown()).await?;
    info!("rulecheck shutting down");
    Ok(())
}

async fn wait_for_shutdown() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
