use sleep_well::{load_dataset, resolve_addr, resolve_data_path, router, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path();
    let dataset = load_dataset(&data_path).await.map_err(|err| {
        error!(path = %data_path.display(), "failed to load dataset: {err}");
        err
    })?;
    if dataset.is_empty() {
        warn!("dataset has no rows; serving empty plot");
    }

    let app = router(AppState::new(dataset));

    let addr = resolve_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
