//! Dashboard state management
//!
//! Contains the per-widget poll state and the main dashboard state struct.
//! Each widget's state is private to it; pollers never touch state directly,
//! they queue `WidgetUpdate`s that the UI loop applies once per frame.

use crate::auditor::AuditorState;
use crate::environment::Environment;
use crate::models::{DashboardStats, IdentitySession, RiskSnapshot, SecurityEvent};
use crate::updates::WidgetUpdate;

use std::collections::VecDeque;
use std::time::Instant;

/// Result state of one polled widget.
///
/// `data` starts empty and is replaced wholesale on every successful cycle.
/// A failed cycle only sets `last_error`; the last known data stays visible.
/// The generation watermark implements last-issued-wins: an update from an
/// older request than the newest applied one is discarded.
#[derive(Debug, Clone)]
pub struct PollState<T> {
    data: Option<T>,
    last_error: bool,
    watermark: u64,
    last_synced: Option<String>,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            data: None,
            last_error: false,
            watermark: 0,
            last_synced: None,
        }
    }
}

impl<T> PollState<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn last_error(&self) -> bool {
        self.last_error
    }

    pub fn last_synced(&self) -> Option<&str> {
        self.last_synced.as_deref()
    }

    /// True when `generation` is not newer than the last applied update.
    pub fn is_stale(&self, generation: u64) -> bool {
        generation <= self.watermark
    }

    pub fn apply(&mut self, generation: u64, data: T, synced_at: String) {
        self.data = Some(data);
        self.last_error = false;
        self.watermark = generation;
        self.last_synced = Some(synced_at);
    }

    pub fn record_failure(&mut self, generation: u64) {
        self.watermark = generation;
        self.last_error = true;
    }
}

/// State backing the dashboard screen. Owned exclusively by the UI loop.
#[derive(Debug)]
pub struct DashboardState {
    /// The environment in which the application is running.
    pub environment: Environment,
    /// The start time of the application, used for computing uptime.
    pub start_time: Instant,
    /// Animation tick counter
    pub tick: usize,
    /// Whether keystrokes are routed to the auditor's snippet editor.
    pub input_focused: bool,
    /// Whether to enable the dashboard background fill
    pub with_background_color: bool,

    /// Queue of updates waiting to be applied
    pub(super) pending_updates: VecDeque<WidgetUpdate>,

    pub(super) stats: PollState<DashboardStats>,
    pub(super) events: PollState<Vec<SecurityEvent>>,
    pub(super) sessions: PollState<Vec<IdentitySession>>,
    /// Code auditor workflow state (input, phase, report).
    pub auditor: AuditorState,
}

impl DashboardState {
    /// Creates a new instance of the dashboard state.
    pub fn new(environment: Environment, start_time: Instant, with_background_color: bool) -> Self {
        Self {
            environment,
            start_time,
            tick: 0,
            input_focused: false,
            with_background_color,
            pending_updates: VecDeque::new(),
            stats: PollState::default(),
            events: PollState::default(),
            sessions: PollState::default(),
            auditor: AuditorState::new(),
        }
    }

    /// Queue an update for application on the next frame.
    pub fn queue_update(&mut self, update: WidgetUpdate) {
        self.pending_updates.push_back(update);
    }

    pub fn stats(&self) -> &PollState<DashboardStats> {
        &self.stats
    }

    pub fn events(&self) -> &PollState<Vec<SecurityEvent>> {
        &self.events
    }

    pub fn sessions(&self) -> &PollState<Vec<IdentitySession>> {
        &self.sessions
    }

    /// Composite risk to render; the placeholder before first data arrives.
    pub fn risk_snapshot(&self) -> RiskSnapshot {
        self.stats
            .data()
            .map(|stats| stats.global_risk.clone())
            .unwrap_or_default()
    }

    /// Most recent sync stamp across the polled widgets, for the footer.
    pub fn last_synced(&self) -> Option<&str> {
        [
            self.stats.last_synced(),
            self.events.last_synced(),
            self.sessions.last_synced(),
        ]
        .into_iter()
        .flatten()
        .max()
    }
}
