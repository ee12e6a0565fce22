//! Error types for the MindAI workspace.
//!
//! Two layers live here:
//! - [`MindaiError`]: infrastructure-level failures (storage, config, transport plumbing).
//! - [`ActionError`]: the user-facing failures of the solution orchestrator.
//!   Their `Display` output is the plain-language text shown in notifications.

use thiserror::Error;

use crate::solution::ConsistencyViolation;

/// A shared error type for storage, configuration and transport plumbing.
#[derive(Error, Debug, Clone)]
pub enum MindaiError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error (snapshot store, identity file)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Transport error (HTTP client construction, connection)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MindaiError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

impl From<std::io::Error> for MindaiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MindaiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MindaiError>`.
pub type Result<T> = std::result::Result<T, MindaiError>;

/// Why the orchestrator could not start from the durable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitFailure {
    /// The durable store holds no snapshot for this session.
    Missing,
    /// A snapshot exists but could not be read or lacks its identifiers.
    Malformed(String),
}

impl std::fmt::Display for InitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitFailure::Missing => {
                write!(f, "No solution found. Please describe your problem first.")
            }
            InitFailure::Malformed(detail) => write!(
                f,
                "Error loading solution ({}). Please describe your problem again.",
                detail
            ),
        }
    }
}

/// Failures of the solution orchestrator's actions.
///
/// Every variant leaves the orchestrator's state at its last-known-good value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("{0}")]
    Initialization(InitFailure),

    #[error("Session expired. Please describe your problem again.")]
    SessionExpired,

    #[error("Failed to refine: {0}")]
    RefinementFailed(String),

    #[error("Could not save feedback: {0}")]
    FeedbackFailed(String),

    #[error("Could not save: {0}")]
    SaveFailed(String),

    #[error("Failed to refine: the server returned an inconsistent solution ({0})")]
    Consistency(ConsistencyViolation),
}

impl ActionError {
    /// True when the user has to restart the problem-submission flow.
    pub fn requires_restart(&self) -> bool {
        matches!(self, Self::Initialization(_) | Self::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_messages() {
        let missing = ActionError::Initialization(InitFailure::Missing);
        assert_eq!(
            missing.to_string(),
            "No solution found. Please describe your problem first."
        );

        let malformed = ActionError::Initialization(InitFailure::Malformed("bad json".into()));
        assert!(malformed.to_string().contains("bad json"));
        assert!(malformed.requires_restart());
    }

    #[test]
    fn test_action_messages_carry_reason() {
        let err = ActionError::RefinementFailed("HTTP 502".into());
        assert_eq!(err.to_string(), "Failed to refine: HTTP 502");
        assert!(!err.requires_restart());

        let err = ActionError::SaveFailed("timeout".into());
        assert_eq!(err.to_string(), "Could not save: timeout");
    }

    #[test]
    fn test_consistency_message_names_the_violation() {
        let stale = ActionError::Consistency(ConsistencyViolation::CountNotAdvanced {
            held: 2,
            reported: 1,
        });
        assert_eq!(
            stale.to_string(),
            "Failed to refine: the server returned an inconsistent solution \
             (refinement count 1 does not advance past 2)"
        );

        let foreign = ActionError::Consistency(ConsistencyViolation::ProblemMismatch {
            expected: "problem-1".into(),
            reported: "problem-9".into(),
        });
        assert!(foreign.to_string().contains("inconsistent solution"));
        assert!(foreign.to_string().contains("problem 'problem-9'"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: MindaiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
    }
}
