use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::container::Container;
use super::router::build_router;

/// Binds `addr` and serves until Ctrl+C or SIGTERM, then closes the store.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_listener(listener, container, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are drained before the container's store is closed.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    container: Arc<Container>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Persona chat service listening on http://{}", addr);

    let result = axum::serve(listener, build_router(container.clone()))
        .with_graceful_shutdown(shutdown)
        .await;

    container.shutdown();
    info!("Persona chat service stopped");

    result.map_err(Into::into)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, draining connections...");
}
