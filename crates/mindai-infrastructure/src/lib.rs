pub mod config_service;
pub mod file_snapshot_store;
pub mod http_transport;
pub mod identity_service;
pub mod memory_snapshot_store;
pub mod paths;
pub mod storage;
pub mod tracing_notification;

pub use crate::config_service::ConfigService;
pub use crate::file_snapshot_store::FileSnapshotStore;
pub use crate::http_transport::HttpSolutionTransport;
pub use crate::identity_service::FileIdentityProvider;
pub use crate::memory_snapshot_store::InMemorySnapshotStore;
pub use crate::paths::MindaiPaths;
pub use crate::tracing_notification::TracingNotificationSink;
