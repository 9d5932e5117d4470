//! Command execution context
//!
//! Loads configuration and builds the API client once per invocation.

use std::path::Path;
use std::sync::Arc;

use crate::cli::progress::ProgressObserver;
use crate::client::ReportPortalClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution: config, client and progress observer.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Unauthenticated client; the first fetch authenticates
    pub client: ReportPortalClient,
    /// Observer shared with the client
    pub progress: Arc<ProgressObserver>,
}

impl CommandContext {
    /// Load config and create the client.
    ///
    /// No network traffic happens here, so configuration problems surface
    /// before any request is made.
    ///
    /// # Errors
    /// Returns error if the config cannot be loaded or has no credentials.
    pub fn new(config_path: Option<&Path>, no_verify: bool, show_progress: bool) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        if no_verify {
            config.verify_ssl = false;
        }

        let progress = Arc::new(if show_progress {
            ProgressObserver::with_spinner()
        } else {
            ProgressObserver::quiet()
        });

        let client = ReportPortalClient::from_config(&config)?.with_observer(progress.clone());

        Ok(Self {
            config,
            client,
            progress,
        })
    }
}
