use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::parse_request_line;
use crate::http::request::Request;
use crate::http::resolve::{self, ResolveError};
use crate::http::response::{self, Response, StatusCode};
use crate::http::writer::ResponseWriter;
use crate::server::ServerContext;

/// One accepted connection. Serves a single request, then closes.
pub struct Connection<S> {
    stream: BufReader<S>,
    peer: SocketAddr,
    ctx: Arc<ServerContext>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// A request line as received, before parsing.
struct RawLine {
    text: String,
    /// Longer than the limit; `text` holds only the first `limit` bytes.
    truncated: bool,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, ctx: Arc<ServerContext>) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
            ctx,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to completion. The stream is shut down on every
    /// path, including errors.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        self.close().await;
        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(&req).await?;
                    tracing::info!(
                        peer = %self.peer,
                        method = %req.method,
                        target = %req.target,
                        status = response.status.as_u16(),
                        "{}",
                        response.status
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    let write = writer.write_to_stream(self.stream.get_mut());
                    match self.ctx.config.write_timeout {
                        Some(duration) => match tokio::time::timeout(duration, write).await {
                            Ok(res) => res?,
                            Err(_) => {
                                tracing::debug!(peer = %self.peer, "Timed out sending response");
                            }
                        },
                        None => write.await?,
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads and parses the request line. `None` means close without
    /// answering: the peer sent nothing, timed out, or sent a malformed line.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let Some(line) = self.read_line().await? else {
            return Ok(None);
        };

        self.ctx.access_log.record(self.peer.ip(), &line.text).await;

        if line.truncated {
            tracing::debug!(peer = %self.peer, "Request line too long, dropping");
            return Ok(None);
        }

        match parse_request_line(&line.text) {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                tracing::debug!(peer = %self.peer, "Malformed request, dropping: {}", e);
                Ok(None)
            }
        }
    }

    async fn read_line(&mut self) -> anyhow::Result<Option<RawLine>> {
        let limit = self.ctx.config.max_line_len;
        let read_timeout = self.ctx.config.read_timeout;

        // One byte past the limit tells a full-length line ending at EOF
        // apart from one that keeps going.
        let mut buf = Vec::new();
        let mut reader = (&mut self.stream).take(limit as u64 + 1);
        let read = reader.read_until(b'\n', &mut buf);

        let n = match read_timeout {
            Some(duration) => match tokio::time::timeout(duration, read).await {
                Ok(res) => res?,
                Err(_) => {
                    tracing::debug!(peer = %self.peer, "Timed out waiting for request line");
                    return Ok(None);
                }
            },
            None => read.await?,
        };

        if n == 0 {
            return Ok(None);
        }

        let truncated = buf.len() > limit && !buf.ends_with(b"\n");
        if truncated {
            buf.truncate(limit);
        }
        let text = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\r', '\n'])
            .to_string();

        Ok(Some(RawLine { text, truncated }))
    }

    async fn handle_request(&self, req: &Request) -> anyhow::Result<Response> {
        let root = &self.ctx.config.root_dir;

        if !req.is_get() {
            return Ok(response::error_page(root, StatusCode::MethodNotAllowed).await);
        }

        match resolve::resolve(root, &req.target, self.ctx.config.path_policy()).await {
            Ok(file) => {
                let body = tokio::fs::read(&file.path)
                    .await
                    .with_context(|| format!("reading {}", file.path.display()))?;
                Ok(Response::ok(file.content_type(), body))
            }
            Err(e @ (ResolveError::Forbidden(_) | ResolveError::OutsideRoot(_))) => {
                tracing::debug!(peer = %self.peer, "{}", e);
                Ok(response::error_page(root, StatusCode::Forbidden).await)
            }
            Err(e @ ResolveError::NotFound(_)) => {
                tracing::debug!(peer = %self.peer, "{}", e);
                Ok(response::error_page(root, StatusCode::NotFound).await)
            }
        }
    }

    async fn close(&mut self) {
        self.state = ConnectionState::Closed;
        if let Err(e) = self.stream.get_mut().shutdown().await {
            tracing::debug!(peer = %self.peer, "Error closing connection: {}", e);
        }
    }
}
