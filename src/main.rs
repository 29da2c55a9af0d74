mod bot;

use anyhow::Result;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use trade_setup_bot::config::Config;

use crate::bot::SetupBot;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Subscriber is not up yet; fall back to a default filter for this one line.
            fmt().with_target(false).init();
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let bot = SetupBot::new(cfg);
    bot.run().await?;

    Ok(())
}
