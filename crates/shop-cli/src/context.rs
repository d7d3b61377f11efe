use std::sync::Arc;

use anyhow::Context;
use shop_config::ShopConfig;
use shop_gateway::HttpGateway;
use shop_sync::{Console, ConsoleOptions};

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config plus the optional `--config` file.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ShopConfig> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            tracing::warn!(%error, "failed to read .env file");
        }
    }

    let config = match &flags.config {
        Some(path) => ShopConfig::load_with_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ShopConfig::load().context("failed to load configuration")?,
    };
    tracing::debug!(base_url = %config.backend.normalized_base_url(), "configuration loaded");
    Ok(config)
}

/// Shared state for command handlers.
pub struct AppContext {
    pub config: ShopConfig,
    pub gateway: Arc<HttpGateway>,
}

impl AppContext {
    pub fn init(config: ShopConfig) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(&config.backend, &config.endpoints)
            .context("failed to build backend client")?;
        Ok(Self {
            config,
            gateway: Arc::new(gateway),
        })
    }

    /// A console configured from the loaded config.
    pub fn console(&self) -> Console<HttpGateway> {
        self.console_with(self.options())
    }

    pub fn console_with(&self, options: ConsoleOptions) -> Console<HttpGateway> {
        Console::with_shared(Arc::clone(&self.gateway), options)
    }

    pub fn options(&self) -> ConsoleOptions {
        ConsoleOptions::from_config(&self.config)
    }
}
