//! Widget update messages
//!
//! Typed messages flowing from the poller tasks and the auditor task to the
//! UI loop. Each polled widget stamps its updates with a monotonic generation
//! so a slow response can never clobber newer data.

use crate::models::{AuditReport, DashboardStats, IdentitySession, SecurityEvent};
use chrono::Local;
use std::fmt::Display;

/// The dashboard widget an update belongs to. Each widget owns its state
/// exclusively; there is no cross-widget coordination.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Widget {
    RiskGauge,
    EventFeed,
    SessionTable,
    CodeAuditor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePayload {
    /// Fresh dashboard summary; replaces the prior snapshot wholesale.
    Stats(DashboardStats),
    /// Fresh event feed; replaces the prior list wholesale.
    Events(Vec<SecurityEvent>),
    /// Fresh session list; replaces the prior list wholesale.
    Sessions(Vec<IdentitySession>),
    /// A poll cycle failed; last known data stays untouched.
    FetchFailed,
    /// A code analysis request completed with a report.
    AuditCompleted(AuditReport),
    /// A code analysis request failed; no report is fabricated.
    AuditFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetUpdate {
    pub widget: Widget,
    /// Monotonic per-widget sequence number of the request that produced
    /// this update. The UI discards anything not newer than what it applied.
    pub generation: u64,
    pub payload: UpdatePayload,
    /// Local wall-clock stamp, used for the footer's "last synced" display.
    pub timestamp: String,
}

impl WidgetUpdate {
    pub fn new(widget: Widget, generation: u64, payload: UpdatePayload) -> Self {
        Self {
            widget,
            generation,
            payload,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self.payload,
            UpdatePayload::FetchFailed | UpdatePayload::AuditFailed
        )
    }
}

impl Display for WidgetUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} gen={} {}",
            self.timestamp,
            self.widget,
            self.generation,
            if self.is_failure() { "failed" } else { "ok" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_flag() {
        let failed = WidgetUpdate::new(Widget::EventFeed, 3, UpdatePayload::FetchFailed);
        assert!(failed.is_failure());

        let ok = WidgetUpdate::new(Widget::EventFeed, 4, UpdatePayload::Events(Vec::new()));
        assert!(!ok.is_failure());
    }
}
