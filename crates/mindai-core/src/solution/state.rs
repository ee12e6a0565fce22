//! Solution state and its pure transitions.
//!
//! Every transition takes `&self` and returns a new [`SolutionState`], so the
//! orchestrator can validate a candidate state before swapping it in.

use std::fmt;

use crate::error::{ActionError, InitFailure};

use super::judgment::{Vote, VoteDirection};
use super::model::SolutionSnapshot;
use super::refinement::{RefinementKind, RefinementType};

/// Why a refinement response was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyViolation {
    /// The reported count does not advance past the held count.
    CountNotAdvanced { held: u32, reported: u32 },
    /// The response belongs to a different session.
    SessionMismatch { expected: String, reported: String },
    /// The response belongs to a different problem.
    ProblemMismatch { expected: String, reported: String },
    /// The response reports a different transformation than requested.
    TypeMismatch {
        requested: RefinementKind,
        reported: String,
    },
}

impl fmt::Display for ConsistencyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountNotAdvanced { held, reported } => write!(
                f,
                "refinement count {} does not advance past {}",
                reported, held
            ),
            Self::SessionMismatch { expected, reported } => {
                write!(f, "session '{}' does not match '{}'", reported, expected)
            }
            Self::ProblemMismatch { expected, reported } => {
                write!(f, "problem '{}' does not match '{}'", reported, expected)
            }
            Self::TypeMismatch {
                requested,
                reported,
            } => write!(f, "requested '{}' but got '{}'", requested, reported),
        }
    }
}

/// What a vote request should do given the current judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePlan {
    /// Same direction again: clear locally, no request.
    ClearLocally,
    /// Send the vote to the backend.
    Submit(VoteDirection),
}

/// The canonical view of the displayed solution plus its transient flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionState {
    snapshot: SolutionSnapshot,
    vote: Vote,
    saved: bool,
}

impl SolutionState {
    /// Builds the initial state from a startup snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Initialization` when `sessionId` or `problemId`
    /// is missing.
    pub fn from_snapshot(snapshot: SolutionSnapshot) -> Result<Self, ActionError> {
        let missing = snapshot.missing_identifiers();
        if !missing.is_empty() {
            return Err(ActionError::Initialization(InitFailure::Malformed(format!(
                "missing {}",
                missing.join(", ")
            ))));
        }

        Ok(Self {
            snapshot,
            vote: Vote::None,
            saved: false,
        })
    }

    pub fn snapshot(&self) -> &SolutionSnapshot {
        &self.snapshot
    }

    pub fn vote(&self) -> Vote {
        self.vote
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Precondition for any request that needs the session and problem ids.
    pub fn ensure_active(&self) -> Result<(), ActionError> {
        if self.snapshot.has_identity() {
            Ok(())
        } else {
            Err(ActionError::SessionExpired)
        }
    }

    /// Accepts a refinement response, producing the replacement state.
    ///
    /// The response must stay within the same session and problem, report the
    /// requested transformation, and carry a count strictly greater than the
    /// one held now. An absent `refinementType` is read as the requested kind.
    /// The new state starts with no vote and unsaved.
    pub fn refined(
        &self,
        requested: RefinementKind,
        mut response: SolutionSnapshot,
    ) -> Result<Self, ActionError> {
        let current = &self.snapshot;

        if response.session_id != current.session_id {
            return Err(ActionError::Consistency(
                ConsistencyViolation::SessionMismatch {
                    expected: current.session_id.clone(),
                    reported: response.session_id,
                },
            ));
        }
        if response.problem_id != current.problem_id {
            return Err(ActionError::Consistency(
                ConsistencyViolation::ProblemMismatch {
                    expected: current.problem_id.clone(),
                    reported: response.problem_id,
                },
            ));
        }
        if response.refinement_count <= current.refinement_count {
            return Err(ActionError::Consistency(
                ConsistencyViolation::CountNotAdvanced {
                    held: current.refinement_count,
                    reported: response.refinement_count,
                },
            ));
        }

        // The wire default for a missing type is `initial`, which a
        // refinement response can never legitimately report.
        if response.refinement_type == RefinementType::Initial {
            response.refinement_type = requested.into();
        }
        if response.refinement_type != RefinementType::from(requested) {
            return Err(ActionError::Consistency(
                ConsistencyViolation::TypeMismatch {
                    requested,
                    reported: response.refinement_type.as_str().to_string(),
                },
            ));
        }

        // Immutable per chain; keep the original wording if the server omits it.
        if response.problem_text.is_empty() {
            response.problem_text = current.problem_text.clone();
        }

        Ok(Self {
            snapshot: response,
            vote: Vote::None,
            saved: false,
        })
    }

    /// Decides whether a vote is a local toggle-off or a request.
    pub fn plan_vote(&self, direction: VoteDirection) -> VotePlan {
        if self.vote.matches(direction) {
            VotePlan::ClearLocally
        } else {
            VotePlan::Submit(direction)
        }
    }

    pub fn with_vote(&self, vote: Vote) -> Self {
        Self {
            vote,
            ..self.clone()
        }
    }

    /// Marks the solution saved. Saved never goes back to false for the same
    /// snapshot.
    pub fn with_saved(&self) -> Self {
        Self {
            saved: true,
            ..self.clone()
        }
    }

    /// Detaches the state from its session. Requests that need the session or
    /// problem id fail with `SessionExpired` afterwards.
    pub fn expired(&self) -> Self {
        let mut next = self.clone();
        next.snapshot.session_id.clear();
        next.snapshot.problem_id.clear();
        next
    }

    /// True while `solution_id` is still the displayed solution.
    pub fn is_current(&self, solution_id: &str) -> bool {
        self.snapshot.solution_id == solution_id
    }
}
