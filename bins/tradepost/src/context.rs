//! Client construction from global flags
//!
//! Precedence for the backend root: `--base-url` (or `TRADEPOST_API_URL`),
//! then the `--config` file, then the environment defaults.

use crate::output::OutputFormat;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tradepost_api_client::{ClientConfig, FileTokenStore, MarketClient};

/// Flags shared by every subcommand
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: Option<String>,
    pub config: Option<PathBuf>,
    pub token_file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl GlobalArgs {
    /// Resolve the client configuration
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::from_env()?,
        };

        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        })
    }

    /// Credential file used by this invocation
    pub fn token_store(&self) -> Result<FileTokenStore> {
        match &self.token_file {
            Some(path) => Ok(FileTokenStore::new(path)),
            None => FileTokenStore::default_location()
                .context("no --token-file given and no default location available"),
        }
    }

    /// Client that reads its credential from the token file
    pub fn client(&self) -> Result<MarketClient> {
        let store = self.token_store()?;
        tracing::debug!(path = %store.path().display(), "Using credential file");
        let client = MarketClient::with_config(self.client_config()?, Arc::new(store))?;
        Ok(client)
    }
}
