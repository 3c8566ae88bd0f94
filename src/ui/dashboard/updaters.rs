//! Dashboard state update logic
//!
//! Applies queued widget updates to dashboard state. Every successful
//! telemetry payload replaces the widget's prior data wholesale; the
//! generation watermark discards anything a newer request has superseded.

use super::state::DashboardState;

use crate::updates::{UpdatePayload, Widget, WidgetUpdate};

impl DashboardState {
    /// Advance one frame: bump the animation tick and apply all queued
    /// updates in arrival order.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Some(update) = self.pending_updates.pop_front() {
            self.apply_update(update);
        }
    }

    /// Apply a single update to the owning widget's state.
    pub fn apply_update(&mut self, update: WidgetUpdate) {
        let WidgetUpdate {
            widget,
            generation,
            payload,
            timestamp,
        } = update;

        match widget {
            Widget::RiskGauge => match payload {
                UpdatePayload::Stats(stats) if !self.stats.is_stale(generation) => {
                    self.stats.apply(generation, stats, timestamp);
                }
                UpdatePayload::FetchFailed if !self.stats.is_stale(generation) => {
                    self.stats.record_failure(generation);
                }
                payload => Self::discard(widget, generation, &payload),
            },
            Widget::EventFeed => match payload {
                UpdatePayload::Events(events) if !self.events.is_stale(generation) => {
                    self.events.apply(generation, events, timestamp);
                }
                UpdatePayload::FetchFailed if !self.events.is_stale(generation) => {
                    self.events.record_failure(generation);
                }
                payload => Self::discard(widget, generation, &payload),
            },
            Widget::SessionTable => match payload {
                UpdatePayload::Sessions(sessions) if !self.sessions.is_stale(generation) => {
                    self.sessions.apply(generation, sessions, timestamp);
                }
                UpdatePayload::FetchFailed if !self.sessions.is_stale(generation) => {
                    self.sessions.record_failure(generation);
                }
                payload => Self::discard(widget, generation, &payload),
            },
            Widget::CodeAuditor => {
                self.auditor.apply_outcome(generation, payload);
            }
        }
    }

    fn discard(widget: Widget, generation: u64, payload: &UpdatePayload) {
        log::debug!("discarding update for {widget} gen={generation}: {payload:?}");
    }
}
