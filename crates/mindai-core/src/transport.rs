//! Request/response contract with the generation backend.
//!
//! Implementations own timeouts and connection handling; every failure is
//! surfaced as a single human-readable [`TransportError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solution::{RefinementKind, SolutionSnapshot, VoteDirection};

/// Body of `POST /api/refine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub session_id: String,
    pub problem_id: String,
    pub refinement_type: RefinementKind,
}

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub solution_id: String,
    pub vote: VoteDirection,
}

/// Body of `POST /api/save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub solution_id: String,
}

/// A failed exchange with the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Client for the solution generation service.
#[async_trait]
pub trait SolutionTransport: Send + Sync {
    /// Requests a regenerated solution. Returns the complete new snapshot.
    async fn refine(&self, request: &RefineRequest) -> Result<SolutionSnapshot, TransportError>;

    /// Records a judgment for a solution.
    async fn submit_feedback(&self, request: &FeedbackRequest) -> Result<(), TransportError>;

    /// Persists a solution server-side.
    async fn save(&self, request: &SaveRequest) -> Result<(), TransportError>;
}
