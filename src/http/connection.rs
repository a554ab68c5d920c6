//! Per-connection request pumping.
//!
//! One handler owns one accepted stream and one parser. It reads while the
//! peer has data, feeds the parser a byte at a time, and hands the finished
//! request to the routing table exactly once. The stream is closed when the
//! handler is dropped, whichever way the pump loop ends.

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::parser::RequestParser;
use crate::server::dispatcher::RoutingTable;

/// Read buffer size per poll. Bytes are still fed to the parser one at a time.
const READ_CHUNK: usize = 512;

pub struct ConnectionHandler {
    stream: TcpStream,
    parser: RequestParser,
    routes: RoutingTable,
    read_timeout: Duration,
}

impl ConnectionHandler {
    pub fn new(stream: TcpStream, routes: RoutingTable, read_timeout: Duration) -> Self {
        Self {
            stream,
            parser: RequestParser::new(),
            routes,
            read_timeout,
        }
    }

    /// Pump bytes from the stream into the parser until the request
    /// completes, the peer closes, the idle timeout elapses, or a read fails.
    ///
    /// Errors are returned to the spawning task, which logs them; they never
    /// reach the accept loop.
    pub async fn run(mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK];

        'pump: loop {
            let read = timeout(self.read_timeout, self.stream.read(&mut chunk)).await;

            let n = match read {
                // No data within the window: the connection is idle, give
                // up the slot rather than hold it open.
                Err(_elapsed) => break 'pump,

                // Peer closed the stream.
                Ok(Ok(0)) => break 'pump,

                Ok(Ok(n)) => n,

                Ok(Err(e)) => return Err(e).context("read from client failed"),
            };

            for &byte in &chunk[..n] {
                self.parser.feed(byte);

                if self.parser.is_complete() {
                    // Stop reading immediately; anything past the blank
                    // line is not ours to consume.
                    break 'pump;
                }
            }
        }

        if self.parser.is_complete() {
            let request = self.parser.into_request();
            tracing::debug!(
                method = ?request.method(),
                path = ?request.path(),
                "request complete, dispatching"
            );
            self.routes.route(&request).await?;
        }

        Ok(())
    }
}
