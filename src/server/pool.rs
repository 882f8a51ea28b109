//! Fixed-size pool of worker tasks fed by a queue of accepted connections.
//!
//! The queue is unbounded; the pool only bounds how many connections are
//! handled at once.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::http::connection::Connection;
use crate::server::ServerContext;

type Accepted = (TcpStream, SocketAddr);

pub struct WorkerPool {
    sender: mpsc::UnboundedSender<Accepted>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `size` workers (at least one).
    pub fn new(size: usize, ctx: Arc<ServerContext>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size.max(1))
            .map(|id| tokio::spawn(worker(id, receiver.clone(), ctx.clone())))
            .collect();

        Self { sender, workers }
    }

    /// Queues a connection for the next free worker.
    pub fn dispatch(&self, stream: TcpStream, peer: SocketAddr) -> anyhow::Result<()> {
        self.sender
            .send((stream, peer))
            .map_err(|_| anyhow::anyhow!("worker pool is shut down"))
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for handle in &self.workers {
            handle.abort();
        }
    }
}

async fn worker(
    id: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Accepted>>>,
    ctx: Arc<ServerContext>,
) {
    loop {
        // Lock is released before the connection is handled.
        let next = receiver.lock().await.recv().await;

        let Some((stream, peer)) = next else {
            tracing::debug!(worker = id, "Queue closed, worker exiting");
            break;
        };

        tracing::debug!(worker = id, peer = %peer, "Handling connection");

        // Run in its own task so a panic only takes down this connection.
        let ctx = ctx.clone();
        let task = tokio::spawn(async move { Connection::new(stream, peer, ctx).run().await });

        match task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Connection error from {}: {:#}", peer, e),
            Err(e) => tracing::error!("Connection task from {} failed: {}", peer, e),
        }
    }
}
