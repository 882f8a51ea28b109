use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::server::ServerContext;
use crate::server::pool::WorkerPool;

/// Pause after a failed accept before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.listen_addr)
        .await
        .with_context(|| format!("binding {}", cfg.listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);
    info!(
        "Serving {} with {} workers, logging requests to {}",
        cfg.root_dir.display(),
        cfg.workers,
        cfg.log_file.display()
    );

    let ctx = Arc::new(ServerContext::open(cfg).await?);
    serve(listener, ctx).await
}

/// Accepts connections forever, handing each to the worker pool.
pub async fn serve(listener: TcpListener, ctx: Arc<ServerContext>) -> anyhow::Result<()> {
    let pool = WorkerPool::new(ctx.config.workers, ctx.clone());

    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                tracing::debug!("Accepted connection from {}", peer);
                pool.dispatch(socket, peer)?;
            }
            Err(e) => {
                tracing::error!("Error accepting connection: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}
