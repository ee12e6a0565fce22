//! File-backed durable snapshot store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use mindai_core::error::{MindaiError, Result};
use mindai_core::solution::{SnapshotStore, SolutionSnapshot};

use crate::paths::MindaiPaths;
use crate::storage::AtomicJsonFile;

/// Stores the current solution snapshot as a JSON file in the session
/// directory.
///
/// File I/O runs on the blocking pool; writes are atomic replaces.
#[derive(Clone)]
pub struct FileSnapshotStore {
    file: Arc<AtomicJsonFile<SolutionSnapshot>>,
}

impl FileSnapshotStore {
    /// Creates a store at the default snapshot location.
    pub fn new(paths: &MindaiPaths) -> Result<Self> {
        Ok(Self::with_path(paths.snapshot_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    async fn run_blocking<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&AtomicJsonFile<SolutionSnapshot>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| MindaiError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<SolutionSnapshot>> {
        let snapshot = self.run_blocking(|file| Ok(file.load()?)).await?;
        tracing::debug!(
            path = %self.file.path().display(),
            found = snapshot.is_some(),
            "Loaded solution snapshot"
        );
        Ok(snapshot)
    }

    async fn store(&self, snapshot: &SolutionSnapshot) -> Result<()> {
        let snapshot = snapshot.clone();
        self.run_blocking(move |file| Ok(file.save(&snapshot)?))
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.run_blocking(|file| Ok(file.remove()?)).await?;
        tracing::info!(path = %self.file.path().display(), "Cleared solution snapshot");
        Ok(())
    }
}
