//! Application layer for MindAI.
//!
//! Coordinates the solution domain with its collaborators (snapshot store,
//! generation backend, notification sink).

pub mod solution_orchestrator;

pub use solution_orchestrator::{SaveOutcome, SolutionOrchestrator, VoteOutcome};
