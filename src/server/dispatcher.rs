//! Method-based request routing and the accept loop.
//!
//! The dispatcher binds the listening socket up front, then runs the accept
//! loop on its own task once started. Each accepted connection gets its own
//! task and its own parser; the only state they share is the routing table.
//! Lifecycle is a two-state machine, stopped ⇄ running, with idempotent
//! `start`/`stop`.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{Notify, RwLock};
use tokio::time::timeout;

use crate::config::Config;
use crate::http::connection::ConnectionHandler;
use crate::http::request::{Method, Request};
use crate::server::processor::Processor;

#[derive(Default)]
struct Routes {
    processors: HashMap<Method, Arc<dyn Processor>>,
    fallback: Option<Arc<dyn Processor>>,
}

/// Shared method → processor mapping, plus one fallback.
///
/// A cheap-clone handle; every connection task holds one. Registration is
/// meant to happen before the dispatcher starts, but the lock keeps
/// concurrent reads safe regardless.
#[derive(Clone, Default)]
pub struct RoutingTable {
    inner: Arc<RwLock<Routes>>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or overwrites) the processor for a method.
    pub async fn register(&self, method: Method, processor: Arc<dyn Processor>) {
        self.inner.write().await.processors.insert(method, processor);
    }

    /// Registers the processor used when no method-specific one matches.
    pub async fn set_fallback(&self, processor: Arc<dyn Processor>) {
        self.inner.write().await.fallback = Some(processor);
    }

    /// Routes a completed request to its processor, or the fallback.
    ///
    /// No match and no fallback is a configuration mistake and surfaces as
    /// an error rather than being swallowed.
    pub async fn route(&self, request: &Request) -> Result<()> {
        let routes = self.inner.read().await;

        let processor = request
            .method()
            .and_then(|m| routes.processors.get(&m))
            .or(routes.fallback.as_ref());

        match processor {
            Some(processor) => {
                tracing::info!(
                    method = ?request.method(),
                    path = ?request.path(),
                    partial = request.is_partial_request(),
                    "dispatching request"
                );
                processor.process_request(request);
                Ok(())
            }
            None => anyhow::bail!(
                "no processor registered for {:?} and no fallback configured",
                request.method()
            ),
        }
    }
}

/// The server object: listening socket, running flag, and routing table.
pub struct Dispatcher {
    listener: Option<TcpListener>,
    local_addr: SocketAddr,
    routes: RoutingTable,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    accept_timeout: Duration,
    read_timeout: Duration,
}

impl Dispatcher {
    /// Binds the listening socket.
    pub async fn bind(cfg: &Config) -> Result<Self> {
        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
        let local_addr = listener
            .local_addr()
            .context("listener has no local address")?;

        Ok(Self {
            listener: Some(listener),
            local_addr,
            routes: RoutingTable::new(),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(Notify::new()),
            accept_timeout: cfg.accept_timeout,
            read_timeout: cfg.read_timeout,
        })
    }

    /// The bound address; useful when binding to port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Registers (or overwrites) the processor for a method. Intended to be
    /// called before `start`.
    pub async fn register_processor(&self, method: Method, processor: Arc<dyn Processor>) {
        self.routes.register(method, processor).await;
    }

    /// Registers the processor used when no method-specific one matches.
    pub async fn set_fallback_processor(&self, processor: Arc<dyn Processor>) {
        self.routes.set_fallback(processor).await;
    }

    /// A handle to the routing table shared with connection tasks.
    pub fn routes(&self) -> RoutingTable {
        self.routes.clone()
    }

    /// Starts the accept loop on its own task.
    ///
    /// Idempotent: returns true when already running. Returns false when the
    /// listening socket is no longer held (already consumed by an earlier
    /// start/stop cycle), since a stopped dispatcher cannot be restarted.
    pub fn start(&mut self) -> bool {
        if self.running.load(Ordering::SeqCst) {
            return true;
        }
        let Some(listener) = self.listener.take() else {
            return false;
        };

        self.running.store(true, Ordering::SeqCst);
        tracing::info!(addr = %self.local_addr, "dispatcher started");

        let running = Arc::clone(&self.running);
        let shutdown = Arc::clone(&self.shutdown);
        let routes = self.routes.clone();
        let accept_timeout = self.accept_timeout;
        let read_timeout = self.read_timeout;

        tokio::spawn(async move {
            accept_loop(listener, routes, running, shutdown, accept_timeout, read_timeout).await;
        });

        true
    }

    /// Stops the accept loop; idempotent.
    ///
    /// The listening socket closes when the loop exits. In-flight connection
    /// handlers are not cancelled; they run to their own completion.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        tracing::info!("dispatcher stopping");
        self.shutdown.notify_one();
    }
}

/// Accepts connections until stopped, spawning one handler task per
/// connection. The bounded accept wait keeps the running flag checked even
/// when no clients show up.
async fn accept_loop(
    listener: TcpListener,
    routes: RoutingTable,
    running: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    accept_timeout: Duration,
    read_timeout: Duration,
) {
    tracing::info!(timeout = ?accept_timeout, "waiting for connections");

    let mut next_id: u64 = 0;

    while running.load(Ordering::SeqCst) {
        tokio::select! {
            _ = shutdown.notified() => break,

            accepted = timeout(accept_timeout, listener.accept()) => match accepted {
                // Accept window elapsed; expected, go round again.
                Err(_elapsed) => {}

                Ok(Ok((socket, peer))) => {
                    let id = next_id;
                    next_id += 1;
                    tracing::debug!(%peer, id, "starting new handler");

                    let routes = routes.clone();
                    tokio::spawn(async move {
                        let handler = ConnectionHandler::new(socket, routes, read_timeout);
                        if let Err(e) = handler.run().await {
                            tracing::error!(%peer, id, error = %e, "connection handler failed");
                        }
                    });
                }

                // Accept failures are transient; keep serving.
                Ok(Err(e)) => tracing::warn!(error = %e, "accept failed"),
            }
        }
    }

    tracing::info!("accept loop stopped");
    // The listener drops here, closing the socket.
}
