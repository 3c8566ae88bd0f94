//! Dashboard utility functions
//!
//! Maps severity classifications onto terminal colors and icons, and formats
//! timestamps for display. Classification itself lives in `severity`; these
//! are presentation choices only.

use crate::models::EventKind;
use crate::severity::{RiskTier, SessionSeverity};
use ratatui::prelude::Color;

/// Terminal color for a risk tier.
pub fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::Nominal => Color::Green,
        RiskTier::Elevated => Color::Yellow,
        RiskTier::Critical => Color::Red,
    }
}

/// Terminal color for a session severity bucket.
pub fn session_severity_color(severity: SessionSeverity) -> Color {
    match severity {
        SessionSeverity::Safe => Color::Green,
        SessionSeverity::Caution => Color::Yellow,
        SessionSeverity::Danger => Color::Red,
    }
}

/// Icon for a timeline event kind. Unknown kinds already decoded to `Info`.
pub fn event_kind_icon(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Critical => "🔒",
        EventKind::Warning => "⚠ ",
        EventKind::Success => "✅",
        EventKind::Info => "⚡",
    }
}

/// Color for a timeline event kind.
pub fn event_kind_color(kind: EventKind) -> Color {
    match kind {
        EventKind::Critical => Color::Red,
        EventKind::Warning => Color::Yellow,
        EventKind::Success => Color::Green,
        EventKind::Info => Color::Blue,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some(date_part) = timestamp.split(' ').next() {
        if let Some(time_part) = timestamp.split(' ').nth(1) {
            // Extract MM-DD from date and HH:MM:SS from time
            if let Some(month_day) = date_part.get(5..10) {
                return format!("{} {}", month_day, time_part);
            }
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}
