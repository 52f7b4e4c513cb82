//! Serving with a bounded graceful shutdown

use std::time::Duration;

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{info, warn};

use crate::error::ServerError;

/// Serve `app` until `signal` resolves, then wait at most `timeout` for open
/// connections to finish.
///
/// Connections still open when the timeout elapses are abandoned.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    timeout: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        signal.await;
        info!("Waiting up to {:?} for connections to close...", timeout);
        let _ = signalled_tx.send(());
    });

    let deadline = async move {
        if signalled_rx.await.is_ok() {
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result?,
        () = deadline => {
            warn!("Graceful shutdown timed out after {:?}, closing remaining connections", timeout);
        }
    }

    Ok(())
}
