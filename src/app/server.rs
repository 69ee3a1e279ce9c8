use crate::adapters::http::create_router;
use crate::app::state::AppState;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use tokio::net::TcpListener;

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: &dyn ConfigProvider) -> Result<()> {
    tokio::fs::create_dir_all(config.data_dir()).await?;
    let state = AppState::with_data_dir(config.data_dir());
    let app = create_router(state, config.cors_origins());

    let address = format!("{}:{}", config.host(), config.port());
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);
    tracing::info!("📁 Data directory: {}", config.data_dir());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
