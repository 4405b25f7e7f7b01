use live_counter::{build_poller, load_from_env, TerminalDisplay};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = load_from_env().await;
    info!(
        url = %config.stats_url,
        interval_ms = config.poll_interval_ms,
        counters = config.counters.len(),
        "live counter starting"
    );

    let display = Arc::new(TerminalDisplay::new(config.counters.keys().cloned()));
    let poller = build_poller(config, Arc::clone(&display))?;

    poller
        .run(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("failed to listen for ctrl-c: {err}");
                std::future::pending::<()>().await;
            }
        })
        .await;
    display.finish();

    Ok(())
}
