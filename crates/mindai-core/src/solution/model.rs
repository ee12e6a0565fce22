//! Solution snapshot domain model.
//!
//! A [`SolutionSnapshot`] is the unit kept in the durable per-session store and
//! returned by the refinement endpoint. Its JSON form is flat camelCase.

use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;
use super::refinement::RefinementType;

/// Glyph displayed in place of an empty section.
pub const SECTION_PLACEHOLDER: &str = "—";

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The six labeled text sections of a solution, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Interpretation,
    RootCause,
    ImmediateAction,
    SevenDayPlan,
    SuggestedApps,
    AiInsight,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Interpretation,
        SectionKind::RootCause,
        SectionKind::ImmediateAction,
        SectionKind::SevenDayPlan,
        SectionKind::SuggestedApps,
        SectionKind::AiInsight,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Interpretation => "Interpretation",
            SectionKind::RootCause => "Root Cause",
            SectionKind::ImmediateAction => "Immediate Action",
            SectionKind::SevenDayPlan => "7-Day Plan",
            SectionKind::SuggestedApps => "Suggested Apps",
            SectionKind::AiInsight => "AI Insight",
        }
    }
}

/// Generated solution text. Any section may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSections {
    #[serde(default, deserialize_with = "null_as_default")]
    pub interpretation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub root_cause: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub immediate_action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seven_day_plan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_apps: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_insight: String,
}

impl SolutionSections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Interpretation => &self.interpretation,
            SectionKind::RootCause => &self.root_cause,
            SectionKind::ImmediateAction => &self.immediate_action,
            SectionKind::SevenDayPlan => &self.seven_day_plan,
            SectionKind::SuggestedApps => &self.suggested_apps,
            SectionKind::AiInsight => &self.ai_insight,
        }
    }

    /// Section text, or [`SECTION_PLACEHOLDER`] when empty.
    pub fn display_text(&self, kind: SectionKind) -> &str {
        let text = self.get(kind);
        if text.is_empty() {
            SECTION_PLACEHOLDER
        } else {
            text
        }
    }
}

/// The complete state of one displayed solution.
///
/// `session_id`, `problem_id` and `problem_text` never change for the
/// lifetime of a snapshot chain; a refinement replaces the rest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub problem_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub solution_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub problem_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub refinement_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub refinement_type: RefinementType,
    #[serde(flatten)]
    pub sections: SolutionSections,
}

impl SolutionSnapshot {
    /// True when the identifiers needed for any follow-up request are present.
    pub fn has_identity(&self) -> bool {
        !self.session_id.is_empty() && !self.problem_id.is_empty()
    }

    /// Returns the names of the required identifiers that are missing.
    pub fn missing_identifiers(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.session_id.is_empty() {
            missing.push("sessionId");
        }
        if self.problem_id.is_empty() {
            missing.push("problemId");
        }
        missing
    }
}
