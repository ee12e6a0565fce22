//! Solution domain module.
//!
//! # Module Structure
//!
//! - `model`: The durable snapshot (`SolutionSnapshot`) and its sections
//! - `category`: Problem categories and their display metadata
//! - `refinement`: Requestable refinements and recorded transformation types
//! - `judgment`: Up/down votes
//! - `state`: `SolutionState` and its pure transitions
//! - `projection`: Pure state → view derivation
//! - `repository`: Durable snapshot store trait

mod category;
mod judgment;
mod model;
mod projection;
mod refinement;
mod repository;
mod state;

pub use category::{Category, CategoryInfo};
pub use judgment::{Vote, VoteDirection};
pub use model::{SECTION_PLACEHOLDER, SectionKind, SolutionSections, SolutionSnapshot};
pub use projection::{SectionView, SolutionStats, SolutionView, project};
pub use refinement::{RefinementKind, RefinementType};
pub use repository::SnapshotStore;
pub use state::{ConsistencyViolation, SolutionState, VotePlan};
