//! Notification and progress sink trait.
//!
//! Sinks are fire-and-forget: they return nothing and must not panic.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity of a transient user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "✅",
            Severity::Error => "❌",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
        }
    }
}

/// Displays transient status to the user.
pub trait NotificationSink: Send + Sync {
    /// Shows a transient message.
    fn notify(&self, message: &str, severity: Severity);

    /// Shows or hides the busy indicator, optionally with a label.
    fn set_busy(&self, active: bool, label: Option<&str>);
}
