//! Code auditor workflow
//!
//! Owns the on-demand analysis lifecycle: idle until the operator enters a
//! snippet, one request in flight at a time, and a report that is only ever
//! replaced by a newer successful analysis. A failed analysis returns the
//! widget to its non-loading state without fabricating a report.

use crate::backend::AnalysisBackend;
use crate::consts::cli_consts::auditor::MAX_SNIPPET_BYTES;
use crate::logging::log_fetch_failure;
use crate::models::AuditReport;
use crate::updates::{UpdatePayload, Widget, WidgetUpdate};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Observable workflow phase, derived from input and request state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AuditPhase {
    /// No snippet entered; the analyze trigger is disabled.
    Idle,
    /// Snippet present; the analyze trigger is armed.
    Ready,
    /// Request in flight; the trigger is disabled until the outcome arrives.
    Analyzing,
}

#[derive(Debug, Default)]
pub struct AuditorState {
    input: String,
    analyzing: bool,
    /// Sequence number of the most recently issued analysis request.
    generation: u64,
    report: Option<AuditReport>,
    last_error: bool,
}

impl AuditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AuditPhase {
        if self.analyzing {
            AuditPhase::Analyzing
        } else if self.input.is_empty() {
            AuditPhase::Idle
        } else {
            AuditPhase::Ready
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn report(&self) -> Option<&AuditReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> bool {
        self.last_error
    }

    pub fn can_analyze(&self) -> bool {
        self.phase() == AuditPhase::Ready
    }

    /// Append one character of operator input. Editing while a request is in
    /// flight is allowed; the in-flight request keeps the snippet it was
    /// issued with.
    pub fn push_char(&mut self, c: char) {
        if self.input.len() + c.len_utf8() <= MAX_SNIPPET_BYTES {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Arm an analysis request: transitions `Ready -> Analyzing` and hands
    /// back the generation plus the snippet to submit. Returns `None` when
    /// the trigger is disabled (no input, or a request already in flight).
    pub fn begin_analysis(&mut self) -> Option<(u64, String)> {
        if !self.can_analyze() {
            return None;
        }
        self.analyzing = true;
        self.generation += 1;
        Some((self.generation, self.input.clone()))
    }

    /// Apply an analysis outcome. Outcomes from any request other than the
    /// most recently issued one are discarded.
    pub fn apply_outcome(&mut self, generation: u64, payload: UpdatePayload) {
        if generation != self.generation || !self.analyzing {
            log::debug!(
                "discarding audit outcome gen={} (current gen={})",
                generation,
                self.generation
            );
            return;
        }
        match payload {
            UpdatePayload::AuditCompleted(report) => {
                self.analyzing = false;
                self.last_error = false;
                self.report = Some(report);
            }
            UpdatePayload::AuditFailed => {
                // Back to a non-loading state; whatever report was on screen
                // before this run stays, and no new one is invented.
                self.analyzing = false;
                self.last_error = true;
            }
            _ => {}
        }
    }
}

/// Spawn the one-shot analysis request. The outcome arrives on the same
/// update channel the pollers use.
pub fn spawn_analysis(
    backend: Arc<dyn AnalysisBackend>,
    code: String,
    generation: u64,
    sender: mpsc::Sender<WidgetUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let payload = match backend.analyze_code(&code).await {
            Ok(report) => UpdatePayload::AuditCompleted(report),
            Err(e) => {
                log_fetch_failure("code analysis", &e);
                UpdatePayload::AuditFailed
            }
        };
        let _ = sender
            .send(WidgetUpdate::new(Widget::CodeAuditor, generation, payload))
            .await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockAnalysisBackend;
    use crate::backend::error::BackendError;

    fn sample_report(score: u32, findings: &[&str]) -> AuditReport {
        AuditReport {
            vulnerability_score: score,
            owasp_top_10: findings.iter().map(|s| s.to_string()).collect(),
            secure_rewrite_suggestion: None,
            files_analyzed: 1,
            vulnerabilities_found: findings.len() as u32,
        }
    }

    #[test]
    // With no snippet the trigger stays disabled.
    fn test_empty_input_disables_trigger() {
        let mut state = AuditorState::new();
        assert_eq!(state.phase(), AuditPhase::Idle);
        assert!(state.begin_analysis().is_none());
    }

    #[test]
    fn test_ready_to_analyzing_to_result() {
        let mut state = AuditorState::new();
        for c in "eval(x)".chars() {
            state.push_char(c);
        }
        assert_eq!(state.phase(), AuditPhase::Ready);

        let (generation, code) = state.begin_analysis().expect("armed");
        assert_eq!(code, "eval(x)");
        assert_eq!(state.phase(), AuditPhase::Analyzing);
        // Trigger is disabled while the request is in flight.
        assert!(state.begin_analysis().is_none());

        state.apply_outcome(
            generation,
            UpdatePayload::AuditCompleted(sample_report(80, &["RCE"])),
        );
        assert_eq!(state.phase(), AuditPhase::Ready);
        assert_eq!(state.report().unwrap().vulnerability_score, 80);
        assert!(!state.last_error());
    }

    #[test]
    // A failure must not fabricate a report and must clear the loading state.
    fn test_failure_leaves_no_fabricated_report() {
        let mut state = AuditorState::new();
        state.push_char('x');
        let (generation, _) = state.begin_analysis().unwrap();

        state.apply_outcome(generation, UpdatePayload::AuditFailed);
        assert_eq!(state.phase(), AuditPhase::Ready);
        assert!(state.report().is_none());
        assert!(state.last_error());
    }

    #[test]
    // A prior successful report survives a later failed run.
    fn test_prior_report_persists_through_failure() {
        let mut state = AuditorState::new();
        state.push_char('x');
        let (first, _) = state.begin_analysis().unwrap();
        state.apply_outcome(first, UpdatePayload::AuditCompleted(sample_report(10, &[])));

        let (second, _) = state.begin_analysis().unwrap();
        state.apply_outcome(second, UpdatePayload::AuditFailed);

        assert_eq!(state.report().unwrap().vulnerability_score, 10);
        assert!(state.last_error());
    }

    #[test]
    // Outcomes from a superseded request are discarded.
    fn test_stale_outcome_is_discarded() {
        let mut state = AuditorState::new();
        state.push_char('x');
        let (first, _) = state.begin_analysis().unwrap();
        state.apply_outcome(first, UpdatePayload::AuditCompleted(sample_report(10, &[])));

        let (second, _) = state.begin_analysis().unwrap();
        // An outcome tagged with the old generation arrives late.
        state.apply_outcome(first, UpdatePayload::AuditCompleted(sample_report(99, &["x"])));
        assert_eq!(state.phase(), AuditPhase::Analyzing);
        assert_eq!(state.report().unwrap().vulnerability_score, 10);

        state.apply_outcome(second, UpdatePayload::AuditFailed);
        assert_eq!(state.phase(), AuditPhase::Ready);
    }

    #[test]
    fn test_input_respects_size_cap() {
        let mut state = AuditorState::new();
        for _ in 0..(MAX_SNIPPET_BYTES + 10) {
            state.push_char('a');
        }
        assert_eq!(state.input().len(), MAX_SNIPPET_BYTES);
    }

    #[tokio::test]
    async fn test_spawn_analysis_delivers_report() {
        let mut mock = MockAnalysisBackend::new();
        mock.expect_analyze_code()
            .returning(|_| Ok(sample_report(60, &["SQL Injection (OWASP A03:2021)"])));

        let (sender, mut receiver) = mpsc::channel(1);
        spawn_analysis(Arc::new(mock), "SELECT * FROM users".to_string(), 1, sender)
            .await
            .unwrap();

        let update = receiver.recv().await.expect("outcome");
        assert_eq!(update.widget, Widget::CodeAuditor);
        assert_eq!(update.generation, 1);
        match update.payload {
            UpdatePayload::AuditCompleted(report) => {
                assert_eq!(report.owasp_top_10.len(), 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_analysis_reports_failure_without_report() {
        let mut mock = MockAnalysisBackend::new();
        mock.expect_analyze_code().returning(|_| {
            Err(BackendError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let (sender, mut receiver) = mpsc::channel(1);
        spawn_analysis(Arc::new(mock), "code".to_string(), 1, sender)
            .await
            .unwrap();

        let update = receiver.recv().await.expect("outcome");
        assert_eq!(update.payload, UpdatePayload::AuditFailed);
    }
}
