//! File-backed session identity provider.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use mindai_core::error::{MindaiError, Result};
use mindai_core::identity::IdentityProvider;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::paths::MindaiPaths;
use crate::storage::AtomicJsonFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityRecord {
    id: String,
    created_at: String,
}

/// Persists a UUID v4 client identity in the data directory.
///
/// The identity is created on first access and cached in memory; an existing
/// file is never overwritten.
#[derive(Clone)]
pub struct FileIdentityProvider {
    file: Arc<AtomicJsonFile<IdentityRecord>>,
    cached: Arc<Mutex<Option<String>>>,
}

impl FileIdentityProvider {
    pub fn new(paths: &MindaiPaths) -> Result<Self> {
        Ok(Self::with_path(paths.identity_file()?))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
            cached: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl IdentityProvider for FileIdentityProvider {
    async fn get_or_create_identity(&self) -> Result<String> {
        // Held across the file access so concurrent first calls agree.
        let mut cached = self.cached.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let file = self.file.clone();
        let id = tokio::task::spawn_blocking(move || -> Result<String> {
            if let Some(record) = file.load()? {
                if !record.id.is_empty() {
                    return Ok(record.id);
                }
            }

            let record = IdentityRecord {
                id: uuid::Uuid::new_v4().to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            };
            file.save(&record)?;
            tracing::info!(identity = %record.id, "Created client identity");
            Ok(record.id)
        })
        .await
        .map_err(|e| MindaiError::internal(format!("Failed to join task: {}", e)))??;

        *cached = Some(id.clone());
        Ok(id)
    }
}
