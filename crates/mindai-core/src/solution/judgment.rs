//! User judgment (thumbs up/down) on the displayed solution.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A direction the user can vote in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

/// The judgment currently recorded for the displayed solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    #[default]
    None,
    Up,
    Down,
}

impl From<VoteDirection> for Vote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => Vote::Up,
            VoteDirection::Down => Vote::Down,
        }
    }
}

impl Vote {
    /// True when `direction` is already the recorded judgment.
    pub fn matches(&self, direction: VoteDirection) -> bool {
        *self == Vote::from(direction)
    }
}
