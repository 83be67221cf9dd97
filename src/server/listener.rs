use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;
use crate::server::pool::WorkerPool;

/// Pause after a failed accept, so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds the configured address and serves until `shutdown` resolves.
///
/// A bind failure is returned immediately.
pub async fn run<F>(cfg: &Config, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(
        "Listening on {} (root: {}, workers: {})",
        cfg.listen_addr, cfg.static_root, cfg.workers
    );

    let router = Arc::new(Router::new(cfg.static_root.clone()));
    let pool = WorkerPool::new(cfg.workers).drain_timeout(cfg.drain_timeout);

    serve(listener, router, pool, shutdown).await
}

/// Accepts connections and hands each one to the pool.
///
/// When `shutdown` resolves, stops accepting and gives queued and in-flight
/// connections the pool's drain timeout to finish.
pub async fn serve<F>(
    listener: TcpListener,
    router: Arc<Router>,
    pool: WorkerPool,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    debug!("Accepted connection from {}", peer);
                    let router = Arc::clone(&router);
                    pool.execute(handle(socket, peer, router))?;
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            },

            _ = &mut shutdown => {
                info!("Stopped accepting, draining connections");
                break;
            }
        }
    }

    pool.shutdown().await;
    Ok(())
}

async fn handle(socket: TcpStream, peer: SocketAddr, router: Arc<Router>) {
    let mut conn = Connection::new(socket, router);
    if let Err(e) = conn.run().await {
        error!("Connection error from {}: {:#}", peer, e);
    }
}
