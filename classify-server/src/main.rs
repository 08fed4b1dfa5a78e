//! The classify server binary: loads configuration and serves `POST /classify`.

use clap::Parser;
use classify_server::{build_resolver, router, AppState, Cli, ServerConfig, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Load .env before parsing so env-backed flags see it.
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = ServerConfig::from_cli(cli);
    tracing::info!(
        event = "config_loaded",
        host = %config.host,
        port = config.port,
        model = %config.model,
        remote = config.has_credential(),
        "config_loaded"
    );

    let app = router(AppState::new(build_resolver(&config)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(event = "server_listening", %addr, "Application is running on: http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
