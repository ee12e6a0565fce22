//! Wiring of configuration, logging and infrastructure for the binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use mindai_application::SolutionOrchestrator;
use mindai_core::ActionError;
use mindai_core::config::MindaiConfig;
use mindai_core::notification::NotificationSink;
use mindai_core::solution::SolutionView;
use mindai_infrastructure::{
    ConfigService, FileIdentityProvider, FileSnapshotStore, HttpSolutionTransport, MindaiPaths,
};
use tracing_subscriber::EnvFilter;

use crate::console::{self, ConsoleNotificationSink};

const LOG_ENV: &str = "MINDAI_LOG";

/// Loads configuration from `path`, or from the default location.
pub fn load_config(path: Option<PathBuf>) -> Result<MindaiConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(&MindaiPaths::default())?,
    };
    service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// rendered solutions.
///
/// `MINDAI_LOG` wins over `RUST_LOG`, which wins over `logging.level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Shared collaborators for every command.
pub struct AppContext {
    pub snapshot_store: Arc<FileSnapshotStore>,
    pub identity: Arc<FileIdentityProvider>,
    pub transport: Arc<HttpSolutionTransport>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl AppContext {
    pub fn new(config: MindaiConfig) -> Result<Self> {
        let paths = MindaiPaths::new(config.storage.data_dir.clone());
        tracing::debug!(base_url = %config.backend.base_url, "Using backend");

        Ok(Self {
            snapshot_store: Arc::new(FileSnapshotStore::new(&paths)?),
            identity: Arc::new(FileIdentityProvider::new(&paths)?),
            transport: Arc::new(HttpSolutionTransport::new(&config.backend)?),
            notifier: Arc::new(ConsoleNotificationSink),
        })
    }

    /// Starts an orchestrator over the stored snapshot.
    ///
    /// Initialization failures have already been shown to the user, along
    /// with how to continue.
    pub async fn orchestrator(&self) -> Result<(SolutionOrchestrator, SolutionView), ActionError> {
        SolutionOrchestrator::initialize(
            self.snapshot_store.clone(),
            self.transport.clone(),
            self.notifier.clone(),
        )
        .await
        .inspect_err(console::print_restart_hint)
    }
}
