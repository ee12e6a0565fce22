//! Problem categories and their display metadata.

use serde::{Deserialize, Serialize};

/// Display metadata for a category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub label: &'static str,
    pub icon: &'static str,
    /// Accent color as a `#rrggbb` hex string.
    pub color: &'static str,
}

impl CategoryInfo {
    /// `"{icon} {label}"`, as shown on the problem tag and in the stats panel.
    pub fn tag(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

const CAREER: CategoryInfo = CategoryInfo {
    label: "Career & Work",
    icon: "💼",
    color: "#4f9cf9",
};
const MENTAL: CategoryInfo = CategoryInfo {
    label: "Mental Health",
    icon: "🧠",
    color: "#a78bfa",
};
const FINANCE: CategoryInfo = CategoryInfo {
    label: "Finance",
    icon: "💰",
    color: "#34d399",
};
const RELATIONSHIP: CategoryInfo = CategoryInfo {
    label: "Relationships",
    icon: "❤️",
    color: "#f472b6",
};
const HEALTH: CategoryInfo = CategoryInfo {
    label: "Health & Body",
    icon: "🏃‍♂️",
    color: "#fb923c",
};
const PRODUCTIVITY: CategoryInfo = CategoryInfo {
    label: "Productivity",
    icon: "⚡",
    color: "#fbbf24",
};
const GENERAL: CategoryInfo = CategoryInfo {
    label: "General",
    icon: "🌐",
    color: "#8899b4",
};

/// The category a problem was classified under.
///
/// Unrecognized strings are kept as `Unknown(raw)` so they round-trip through
/// the durable store unchanged; they display as [`Category::General`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Career,
    Mental,
    Finance,
    Relationship,
    Health,
    Productivity,
    #[default]
    General,
    Unknown(String),
}

impl Category {
    /// Resolves display metadata, falling back to `general` for unknown keys.
    pub fn info(&self) -> CategoryInfo {
        match self {
            Category::Career => CAREER,
            Category::Mental => MENTAL,
            Category::Finance => FINANCE,
            Category::Relationship => RELATIONSHIP,
            Category::Health => HEALTH,
            Category::Productivity => PRODUCTIVITY,
            Category::General | Category::Unknown(_) => GENERAL,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Career => "career",
            Category::Mental => "mental",
            Category::Finance => "finance",
            Category::Relationship => "relationship",
            Category::Health => "health",
            Category::Productivity => "productivity",
            Category::General => "general",
            Category::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "career" => Category::Career,
            "mental" => Category::Mental,
            "finance" => Category::Finance,
            "relationship" => Category::Relationship,
            "health" => Category::Health,
            "productivity" => Category::Productivity,
            "general" | "" => Category::General,
            _ => Category::Unknown(raw),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}
