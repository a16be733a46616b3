//! TTL Cache host process
//!
//! Keeps a cache alive for the lifetime of the process, restoring its snapshot
//! at startup and writing it back on shutdown.

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Cache, CacheConfig};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and start its janitor
/// 4. Reload the snapshot, if one exists
/// 5. Wait for SIGINT/SIGTERM
/// 6. Save the snapshot and close the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL cache");

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: cleanup_interval={:?}, snapshot={}, prefix={}, reload_ttl={:?}",
        config.cleanup_interval,
        config.snapshot_path.display(),
        config.snapshot_prefix,
        config.reload_ttl
    );

    let policy = config.snapshot_policy();
    let cache: Cache<String, String> = Cache::with_config(&config);

    let loaded = cache.reload(&config.snapshot_path, &policy);
    info!("Restored {} entries from snapshot", loaded);

    shutdown_signal().await?;

    if let Err(err) = cache.save(&config.snapshot_path, &policy) {
        error!("Failed to save snapshot: {}", err);
    }
    let stats = cache.stats();
    info!(
        "Cache stats: entries={}, hits={}, misses={}, hit_rate={:.2}, lazy_evictions={}, swept={}",
        stats.total_entries,
        stats.hits,
        stats.misses,
        stats.hit_rate(),
        stats.lazy_evictions,
        stats.swept
    );
    cache.close();

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::select! {
            result = signal::ctrl_c() => {
                result?;
                info!("Received Ctrl+C, initiating shutdown...");
            }
            _ = terminate.recv() => {
                info!("Received SIGTERM, initiating shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, initiating shutdown...");
    }

    Ok(())
}
