//! Main Entrypoint for the Realtime Relay
//!
//! This binary is responsible for:
//! 1. Parsing the required CLI flags (exiting 1 on an incomplete set, before
//!    any network activity).
//! 2. Initializing logging.
//! 3. Creating the realtime session over HTTP; any failure here is fatal.
//! 4. Running the relay loop until the connection closes or Ctrl+C arrives.

use anyhow::Context;
use realtime_relay::{config::Config, relay, session};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Listens for the `Ctrl+C` signal to shut the relay down.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();

    // The upstream client configures no timeouts at all; a request-level one
    // keeps a stalled session call or webhook POST from hanging forever.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build the HTTP client")?;

    let descriptor = session::create_session(&http, &config)
        .await
        .context("Session initiation failed")?;
    info!(stream = ?descriptor.target, "Realtime session created");

    tokio::select! {
        result = relay::run(&config, &descriptor, http) => result?,
        _ = shutdown_signal() => {}
    }

    Ok(())
}
