//! Display-ready projection of the solution state.
//!
//! [`project`] is a pure function of [`SolutionState`]; a presentation layer
//! (terminal, web view) renders the resulting [`SolutionView`] as-is.

use serde::Serialize;

use super::category::CategoryInfo;
use super::judgment::Vote;
use super::model::SectionKind;
use super::state::SolutionState;

const SESSION_CHIP_CHARS: usize = 8;

/// One rendered solution section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: &'static str,
    /// Section text, or the placeholder glyph when empty.
    pub text: String,
}

/// Sidebar statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStats {
    pub refinement_count: u32,
    pub category_label: String,
    /// `"None"` until the first refinement.
    pub last_refined_label: String,
}

/// Everything a presentation layer needs to draw the solution page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionView {
    pub problem_text: String,
    pub session_chip: String,
    pub category: CategoryInfo,
    pub refinement_badge: Option<String>,
    pub sections: Vec<SectionView>,
    pub stats: SolutionStats,
    pub vote: Vote,
    pub saved: bool,
    /// Set when the view replaces a previous solution after a refinement.
    pub animate: bool,
}

/// Derives the view model from the current state.
pub fn project(state: &SolutionState, animate: bool) -> SolutionView {
    let snapshot = state.snapshot();
    let category = snapshot.category.info();
    let refinement_label = snapshot.refinement_type.label();

    let refinement_badge = (snapshot.refinement_count > 0).then(|| {
        format!(
            "🔄 Refined {}x · {}",
            snapshot.refinement_count, refinement_label
        )
    });

    let last_refined_label = if snapshot.refinement_count > 0 {
        refinement_label.to_string()
    } else {
        "None".to_string()
    };

    let sections = SectionKind::ALL
        .iter()
        .map(|kind| SectionView {
            title: kind.title(),
            text: snapshot.sections.display_text(*kind).to_string(),
        })
        .collect();

    SolutionView {
        problem_text: snapshot.problem_text.clone(),
        session_chip: session_chip(&snapshot.session_id),
        category,
        refinement_badge,
        sections,
        stats: SolutionStats {
            refinement_count: snapshot.refinement_count,
            category_label: category.tag(),
            last_refined_label,
        },
        vote: state.vote(),
        saved: state.is_saved(),
        animate,
    }
}

fn session_chip(session_id: &str) -> String {
    let prefix: String = session_id.chars().take(SESSION_CHIP_CHARS).collect();
    format!("🔐 {}...", prefix)
}
