use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use trade_setup_bot::config::Config;
use trade_setup_bot::conversation::{Dispatcher, InMemorySessionStore};
use trade_setup_bot::core::SetupGenerator;
use trade_setup_bot::messaging::TelegramClient;
use trade_setup_bot::server::{self, AppState};
use trade_setup_bot::storage::GoogleSheetsClient;

/// Pause between dropping the old webhook and registering the new one.
const WEBHOOK_RESET_DELAY: Duration = Duration::from_secs(1);

pub struct SetupBot {
    config: Config,
    telegram: Arc<TelegramClient>,
}

impl SetupBot {
    pub fn new(config: Config) -> Self {
        info!("{}", "=".repeat(60));
        info!("Trading setup bot starting up");
        info!("Spreadsheet: {} ({})", config.spreadsheet_id, config.sheet_range);
        info!(
            "Webhook: {}",
            config.webhook_url().as_deref().unwrap_or("not registered")
        );
        info!("{}", "=".repeat(60));

        let telegram = Arc::new(TelegramClient::new(&config.bot_token));
        Self { config, telegram }
    }

    pub async fn run(self) -> Result<()> {
        self.register_webhook().await;

        let storage = Arc::new(GoogleSheetsClient::new(&self.config));
        let dispatcher = Dispatcher::new(
            self.telegram.clone(),
            Arc::new(InMemorySessionStore::new()),
            SetupGenerator::new(storage),
        );
        let state = Arc::new(AppState { dispatcher });
        let app = server::router(state, &self.config.webhook_path);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Listening on {}. Press Ctrl+C to stop.", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutting down...");
            })
            .await
            .context("HTTP server failed")?;

        info!("Bot stopped.");
        Ok(())
    }

    async fn register_webhook(&self) {
        let Some(url) = self.config.webhook_url() else {
            warn!("No RENDER_EXTERNAL_HOSTNAME, HOSTNAME or DOMAIN set; webhook not registered");
            return;
        };

        if let Err(e) = self.telegram.delete_webhook().await {
            warn!("Failed to remove old webhook: {}", e);
        }
        tokio::time::sleep(WEBHOOK_RESET_DELAY).await;
        if let Err(e) = self.telegram.set_webhook(&url).await {
            error!("Failed to set webhook {}: {}", url, e);
        }
    }
}
