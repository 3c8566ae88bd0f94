use crate::backend::error::BackendError;
use crate::environment::Environment;
use crate::models::{AuditReport, DashboardStats, IdentitySession, SecurityEvent, ServiceHealth};

pub(crate) mod client;
pub use client::BackendClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// Read side of the analysis service. One implementation talks HTTP/JSON;
/// tests mock this trait to drive pollers and the auditor deterministically.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Service health probe (`GET /`).
    async fn health(&self) -> Result<ServiceHealth, BackendError>;

    /// Composite risk summary for the gauge widget.
    async fn dashboard_stats(&self) -> Result<DashboardStats, BackendError>;

    /// Ordered event feed for the timeline widget.
    async fn events(&self) -> Result<Vec<SecurityEvent>, BackendError>;

    /// Identity sessions for the risk table widget.
    async fn identity_sessions(&self) -> Result<Vec<IdentitySession>, BackendError>;

    /// Submit a source snippet for vulnerability analysis.
    async fn analyze_code(&self, code: &str) -> Result<AuditReport, BackendError>;
}
