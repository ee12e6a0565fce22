//! Domain layer for MindAI: the solution model, its state transitions and
//! projection, and the collaborator traits the orchestrator depends on.

pub mod config;
pub mod error;
pub mod identity;
pub mod notification;
pub mod solution;
pub mod transport;

// Re-export common error types
pub use error::{ActionError, InitFailure, MindaiError};
