//! Durable snapshot store trait.

use async_trait::async_trait;

use super::model::SolutionSnapshot;
use crate::error::Result;

/// Per-session durable copy of the current solution snapshot.
///
/// Survives reloads within a session and is cleared when the session ends.
/// The orchestrator is the only writer.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))`: A snapshot is stored
    /// - `Ok(None)`: Nothing stored for this session (normal at first start)
    /// - `Err(_)`: The stored payload could not be read or parsed
    async fn load(&self) -> Result<Option<SolutionSnapshot>>;

    /// Overwrites the stored snapshot.
    async fn store(&self, snapshot: &SolutionSnapshot) -> Result<()>;

    /// Removes the stored snapshot (session end).
    async fn clear(&self) -> Result<()>;
}
