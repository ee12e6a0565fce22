//! In-memory snapshot store.

use async_trait::async_trait;
use mindai_core::error::Result;
use mindai_core::solution::{SnapshotStore, SolutionSnapshot};
use tokio::sync::Mutex;

/// Keeps the snapshot for the lifetime of the process only.
///
/// Nothing touches disk; orchestrator tests run against it.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    snapshot: Mutex<Option<SolutionSnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: SolutionSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<SolutionSnapshot>> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn store(&self, snapshot: &SolutionSnapshot) -> Result<()> {
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.snapshot.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_overwrites() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().await.unwrap().is_none());

        let mut snapshot = SolutionSnapshot {
            solution_id: "a".into(),
            ..Default::default()
        };
        store.store(&snapshot).await.unwrap();
        snapshot.solution_id = "b".into();
        store.store(&snapshot).await.unwrap();

        assert_eq!(store.load().await.unwrap().unwrap().solution_id, "b");
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
