use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use telewatch::feed::TelegraphFetcher;
use telewatch::monitor::Poller;
use telewatch::Config;

#[tokio::main]
async fn main() -> telewatch::Result<()> {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = telewatch::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        telewatch::logging::init_console_only(&config.logging.level);
    }

    config.validate()?;

    info!("telewatch - Cailianpress telegraph watcher");
    info!(
        "Polling {} every {} seconds",
        config.feed.endpoint, config.poll.interval_secs
    );

    let fetcher = TelegraphFetcher::new(config.feed.clone())?;
    let mut poller = Poller::new(fetcher, Duration::from_secs(config.poll.interval_secs));

    // Ctrl-C is the operator's cancellation signal; the loop observes it
    // through the watch channel during its sleep.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received, shutting down"),
            Err(e) => tracing::error!("failed to listen for shutdown signal: {e}"),
        }
        let _ = shutdown_tx.send(true);
    });

    let mut stdout = std::io::stdout();
    poller.run(&mut stdout, shutdown_rx).await?;

    info!("Shut down cleanly");
    Ok(())
}
