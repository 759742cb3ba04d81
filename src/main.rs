//! Policache host.
//!
//! Owns the content cache registries for the lifetime of the process and
//! applies invalidation events read from stdin, one JSON object per line:
//!
//! ```text
//! {"type":"content_saved","content_type_id":1042,"culture":"en-US"}
//! {"type":"refresh_all"}
//! ```
//!
//! Stops on EOF or Ctrl-C, disposes every registry, and prints final stats.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use policache::config::Config;
use policache::content::{ContentCacheManager, InvalidationEvent};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("policache=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting policache host...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let manager = Arc::new(ContentCacheManager::new(&config));
    manager.warm(&config.warm_cultures)?;

    tokio::select! {
        result = apply_events(Arc::clone(&manager)) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    manager.dispose();
    println!("{}", serde_json::to_string_pretty(&manager.stats())?);

    Ok(())
}

/// Read invalidation events from stdin until EOF.
async fn apply_events(manager: Arc<ContentCacheManager>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<InvalidationEvent>(line) {
            Ok(event) => {
                let outcome = manager.handle(&event);
                debug!("Applied {:?} -> {:?}", event, outcome);
            }
            Err(e) => warn!("Skipping malformed event {:?}: {}", line, e),
        }
    }

    info!("Event stream closed");
    Ok(())
}
