//! Wire types for the analysis service.
//!
//! Every payload is validated here at the boundary; a response body that does
//! not match these shapes is treated exactly like a transport failure by the
//! pollers. Successful responses always replace prior widget state wholesale.

use serde::{Deserialize, Deserializer};

/// Composite risk summary nested in the dashboard stats payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RiskSnapshot {
    pub global_risk_score: u32,
    pub status: String,
}

impl Default for RiskSnapshot {
    /// Placeholder shown before the first stats response arrives.
    fn default() -> Self {
        Self {
            global_risk_score: 0,
            status: "CALCULATING...".to_string(),
        }
    }
}

/// Response shape of `GET /api/dashboard/stats`.
///
/// The counters are emitted by the backend alongside the composite risk; they
/// default to zero so a minimal deployment that omits them still decodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardStats {
    pub global_risk: RiskSnapshot,
    #[serde(default)]
    pub active_sessions: u32,
    #[serde(default)]
    pub threats_detected: u32,
    #[serde(default)]
    pub recent_vulnerabilities: u32,
}

/// Event category used for timeline styling.
///
/// Any string the backend invents that is not listed here decodes to `Info`,
/// so an externally-versioned vocabulary can grow without breaking the feed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Critical,
    Warning,
    Success,
    #[serde(other)]
    Info,
}

/// One entry of the `GET /api/events` feed. The producer pre-sorts the feed;
/// its order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecurityEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub message: String,
    pub timestamp: String,
}

/// One row of `GET /api/identity/sessions`. `risk_level` is free-form text;
/// classification happens in `severity` with an unknown-means-danger default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentitySession {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub user: String,
    pub location: String,
    pub risk_level: String,
}

/// Response shape of `POST /api/auditor/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditReport {
    pub vulnerability_score: u32,
    pub owasp_top_10: Vec<String>,
    #[serde(default)]
    pub secure_rewrite_suggestion: Option<String>,
    #[serde(default)]
    pub files_analyzed: u32,
    #[serde(default)]
    pub vulnerabilities_found: u32,
}

/// Response shape of the `GET /` health check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub system: String,
    #[serde(default)]
    pub mode: String,
}

/// The mock backend emits numeric ids where newer deployments emit strings;
/// either form normalizes to `String` instead of failing the poll cycle.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Stats decode from the full backend payload, counters included.
    fn test_dashboard_stats_decode() {
        let body = r#"{
            "global_risk": {"global_risk_score": 92, "status": "CRITICAL_SYSTEM_LOCK"},
            "active_sessions": 4,
            "threats_detected": 2,
            "recent_vulnerabilities": 2
        }"#;
        let stats: DashboardStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.global_risk.global_risk_score, 92);
        assert_eq!(stats.global_risk.status, "CRITICAL_SYSTEM_LOCK");
        assert_eq!(stats.active_sessions, 4);
    }

    #[test]
    // A deployment that only reports the composite risk still decodes.
    fn test_dashboard_stats_counters_default() {
        let body = r#"{"global_risk": {"global_risk_score": 10, "status": "SECURE"}}"#;
        let stats: DashboardStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.threats_detected, 0);
        assert_eq!(stats.recent_vulnerabilities, 0);
    }

    #[test]
    // Numeric event ids (mock backend) normalize to strings.
    fn test_event_numeric_id_normalizes() {
        let body = r#"[
            {"id": 1, "type": "warning", "message": "Admin login from new IP", "timestamp": "2 mins ago"},
            {"id": "evt_2", "type": "success", "message": "Scan completed", "timestamp": "10 mins ago"}
        ]"#;
        let events: Vec<SecurityEvent> = serde_json::from_str(body).unwrap();
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].kind, EventKind::Warning);
        assert_eq!(events[1].id, "evt_2");
    }

    #[test]
    // An unrecognized event type must not fail the feed; it falls back to info.
    fn test_unknown_event_kind_falls_back_to_info() {
        let body = r#"{"id": "x", "type": "anomaly", "message": "?", "timestamp": "now"}"#;
        let event: SecurityEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.kind, EventKind::Info);
    }

    #[test]
    // Extra session fields from the backend (ip_address, timestamp) are ignored.
    fn test_session_decode_ignores_extra_fields() {
        let body = r#"{
            "id": "sess_002", "user": "dev_sam", "ip_address": "45.33.22.11",
            "location": "London, UK", "risk_level": "Impossible Travel",
            "timestamp": "2025-01-01T00:00:00"
        }"#;
        let session: IdentitySession = serde_json::from_str(body).unwrap();
        assert_eq!(session.user, "dev_sam");
        assert_eq!(session.risk_level, "Impossible Travel");
    }

    #[test]
    // The rewrite suggestion is optional on the wire.
    fn test_audit_report_optional_rewrite() {
        let body = r#"{"vulnerability_score": 12, "owasp_top_10": []}"#;
        let report: AuditReport = serde_json::from_str(body).unwrap();
        assert!(report.secure_rewrite_suggestion.is_none());
        assert!(report.owasp_top_10.is_empty());

        let body = r#"{
            "vulnerability_score": 60,
            "owasp_top_10": ["SQL Injection (OWASP A03:2021)"],
            "secure_rewrite_suggestion": "Use parameterized queries."
        }"#;
        let report: AuditReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.owasp_top_10.len(), 1);
        assert_eq!(
            report.secure_rewrite_suggestion.as_deref(),
            Some("Use parameterized queries.")
        );
    }

    #[test]
    fn test_default_risk_snapshot_placeholder() {
        let snapshot = RiskSnapshot::default();
        assert_eq!(snapshot.global_risk_score, 0);
        assert_eq!(snapshot.status, "CALCULATING...");
    }
}
