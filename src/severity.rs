//! Severity classification layer.
//!
//! Maps raw backend fields into discrete visual tiers via fixed thresholds.
//! The score tier and the status tier are independent classifications of
//! independent inputs; they are allowed to disagree and are never reconciled.

/// A discrete severity bucket derived from a continuous risk score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum RiskTier {
    Nominal,
    Elevated,
    Critical,
}

/// Severity bucket for an identity session row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum SessionSeverity {
    Safe,
    Caution,
    Danger,
}

/// Classify a composite risk score. Thresholds are strict greater-than:
/// 80 and 50 fall into the lower tier.
pub fn risk_tier(score: u32) -> RiskTier {
    if score > 80 {
        RiskTier::Critical
    } else if score > 50 {
        RiskTier::Elevated
    } else {
        RiskTier::Nominal
    }
}

/// Classify the backend's status enum string, independently of the score.
pub fn status_tier(status: &str) -> RiskTier {
    match status {
        "CRITICAL_SYSTEM_LOCK" => RiskTier::Critical,
        "HIGH_RISK" => RiskTier::Elevated,
        _ => RiskTier::Nominal,
    }
}

/// Human-readable banner text for a status enum string.
pub fn status_banner(status: &str) -> String {
    status.replace('_', " ")
}

/// Classify a session risk level by literal match. Anything the console does
/// not recognize lands in the most severe bucket (fail-safe default).
pub fn session_severity(risk_level: &str) -> SessionSeverity {
    match risk_level {
        "Safe" => SessionSeverity::Safe,
        "Impossible Travel" => SessionSeverity::Caution,
        _ => SessionSeverity::Danger,
    }
}

/// Theme selector for the audit report: scores above 50 use the danger
/// theme. Independent of whether any findings are listed.
pub fn audit_is_danger(vulnerability_score: u32) -> bool {
    vulnerability_score > 50
}

/// Two-character uppercased initials badge for a user identifier. Identifiers
/// shorter than two characters yield whatever is available.
pub fn initials(user: &str) -> String {
    user.chars().take(2).collect::<String>().to_uppercase()
}
