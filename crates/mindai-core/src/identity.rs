//! Session identity provider trait.

use async_trait::async_trait;

use crate::error::Result;

/// Supplies a stable opaque identifier for this client.
///
/// The identifier is created lazily on first access, survives restarts and
/// is never regenerated once created.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn get_or_create_identity(&self) -> Result<String>;
}
