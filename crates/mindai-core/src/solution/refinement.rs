//! Refinement kinds and the transformation recorded on a snapshot.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A refinement the user can request.
///
/// This is the set of non-initial [`RefinementType`]s.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RefinementKind {
    Refine,
    Alternative,
    Simpler,
    Practical,
    Deeper,
}

impl RefinementKind {
    /// Busy-indicator text shown while the refinement is in flight.
    pub fn loading_message(&self) -> &'static str {
        match self {
            RefinementKind::Refine => "Refining your solution with more detail...",
            RefinementKind::Alternative => "Generating a completely different perspective...",
            RefinementKind::Simpler => "Simplifying into plain language...",
            RefinementKind::Practical => "Building a hands-on, practical plan...",
            RefinementKind::Deeper => "Going deeper with advanced analysis...",
        }
    }

    pub fn label(&self) -> &'static str {
        RefinementType::from(*self).known_label().unwrap_or("Refined")
    }
}

/// The most recent transformation applied to a snapshot.
///
/// Unrecognized values are kept as `Unknown(raw)` and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RefinementType {
    #[default]
    Initial,
    Refine,
    Alternative,
    Simpler,
    Practical,
    Deeper,
    Unknown(String),
}

impl RefinementType {
    fn known_label(&self) -> Option<&'static str> {
        match self {
            RefinementType::Initial => Some("Initial"),
            RefinementType::Refine => Some("Refined"),
            RefinementType::Alternative => Some("Alternative"),
            RefinementType::Simpler => Some("Simplified"),
            RefinementType::Practical => Some("Practical"),
            RefinementType::Deeper => Some("Deeper Analysis"),
            RefinementType::Unknown(_) => None,
        }
    }

    /// Human-readable label; unknown types display their raw string.
    pub fn label(&self) -> &str {
        match self {
            RefinementType::Unknown(raw) => raw,
            known => known.known_label().unwrap_or_default(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RefinementType::Initial => "initial",
            RefinementType::Refine => "refine",
            RefinementType::Alternative => "alternative",
            RefinementType::Simpler => "simpler",
            RefinementType::Practical => "practical",
            RefinementType::Deeper => "deeper",
            RefinementType::Unknown(raw) => raw,
        }
    }
}

impl From<RefinementKind> for RefinementType {
    fn from(kind: RefinementKind) -> Self {
        match kind {
            RefinementKind::Refine => RefinementType::Refine,
            RefinementKind::Alternative => RefinementType::Alternative,
            RefinementKind::Simpler => RefinementType::Simpler,
            RefinementKind::Practical => RefinementType::Practical,
            RefinementKind::Deeper => RefinementType::Deeper,
        }
    }
}

impl From<String> for RefinementType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "initial" | "" => RefinementType::Initial,
            "refine" => RefinementType::Refine,
            "alternative" => RefinementType::Alternative,
            "simpler" => RefinementType::Simpler,
            "practical" => RefinementType::Practical,
            "deeper" => RefinementType::Deeper,
            _ => RefinementType::Unknown(raw),
        }
    }
}

impl From<RefinementType> for String {
    fn from(refinement_type: RefinementType) -> Self {
        refinement_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels() {
        assert_eq!(RefinementType::Deeper.label(), "Deeper Analysis");
        assert_eq!(RefinementType::Simpler.label(), "Simplified");
        assert_eq!(RefinementType::Initial.label(), "Initial");
    }

    #[test]
    fn test_unknown_type_displays_raw() {
        let unknown = RefinementType::from("poetic".to_string());
        assert_eq!(unknown.label(), "poetic");
        assert_eq!(String::from(unknown), "poetic");
    }

    #[test]
    fn test_kind_parses_from_cli_string() {
        assert_eq!(RefinementKind::from_str("deeper").unwrap(), RefinementKind::Deeper);
        assert!(RefinementKind::from_str("initial").is_err());
        assert_eq!(RefinementKind::Practical.to_string(), "practical");
    }

    #[test]
    fn test_every_kind_maps_to_a_known_type() {
        for kind in RefinementKind::iter() {
            let refinement_type = RefinementType::from(kind);
            assert_eq!(refinement_type.as_str(), kind.as_ref());
            assert!(!matches!(refinement_type, RefinementType::Unknown(_)));
        }
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&RefinementKind::Alternative).unwrap();
        assert_eq!(json, "\"alternative\"");
    }
}
