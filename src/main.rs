use std::sync::Arc;

use switchboard::config::Config;
use switchboard::http::request::{Method, Request};
use switchboard::server::dispatcher::Dispatcher;
use switchboard::server::processor::Processor;

/// Logs every request it receives; stands in for a real method handler.
struct LogProcessor {
    label: &'static str,
}

impl Processor for LogProcessor {
    fn process_request(&self, request: &Request) {
        tracing::info!(
            handler = self.label,
            method = ?request.method(),
            path = ?request.path(),
            partial = request.is_partial_request(),
            "processing request"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let mut dispatcher = Dispatcher::bind(&cfg).await?;
    dispatcher
        .register_processor(Method::GET, Arc::new(LogProcessor { label: "get" }))
        .await;
    dispatcher
        .set_fallback_processor(Arc::new(LogProcessor { label: "fallback" }))
        .await;

    if !dispatcher.start() {
        anyhow::bail!("dispatcher failed to start");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    dispatcher.stop();

    Ok(())
}
