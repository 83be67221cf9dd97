use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::{MAX_REQUEST_LINE, ParseError, parse_request_line, strip_line_ending};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Drives a single request/response cycle over one client stream.
pub struct Connection<S> {
    stream: BufReader<S>,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the cycle to completion.
    ///
    /// A missing or malformed request line ends the cycle without a
    /// response. The stream is dropped, and so closed, when the connection
    /// goes out of scope, whichever way this returns.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.route(&req.path).await?;
                    tracing::debug!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Routed request"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    // One request per connection.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads and parses the request line.
    ///
    /// Returns `Ok(None)` when there is nothing to answer: the client sent
    /// nothing, or the line could not be parsed.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let mut line = Vec::with_capacity(128);
        let n = (&mut self.stream)
            .take(MAX_REQUEST_LINE as u64)
            .read_until(b'\n', &mut line)
            .await?;

        if n == 0 {
            // Client closed connection
            return Ok(None);
        }

        if n == MAX_REQUEST_LINE && !line.ends_with(b"\n") {
            tracing::debug!(error = ?ParseError::TooLong, "Dropping request");
            return Ok(None);
        }

        tracing::info!("Request: {}", String::from_utf8_lossy(strip_line_ending(&line)));

        match parse_request_line(&line) {
            Ok(request) => Ok(Some(request)),
            Err(e) => {
                tracing::debug!(error = ?e, "Dropping request");
                Ok(None)
            }
        }
    }
}
