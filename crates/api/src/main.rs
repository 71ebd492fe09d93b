use anyhow::Context;

use teller_infra::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    teller_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let services = teller_api::app::services::build_services(&config.storage)
        .await
        .context("failed to initialize account storage")?;

    let app = teller_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("JSON API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
