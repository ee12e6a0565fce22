//! Notification sink that writes to `tracing`.

use mindai_core::notification::{NotificationSink, Severity};

/// Forwards notifications to the log, for headless runs.
#[derive(Debug, Clone, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(target: "mindai::notify", "{}", message),
            Severity::Warning => tracing::warn!(target: "mindai::notify", "{}", message),
            Severity::Success | Severity::Info => {
                tracing::info!(target: "mindai::notify", %severity, "{}", message)
            }
        }
    }

    fn set_busy(&self, active: bool, label: Option<&str>) {
        tracing::debug!(target: "mindai::notify", active, label = label.unwrap_or(""), "busy");
    }
}
