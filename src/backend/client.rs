//! TrustLock Analysis Service Client
//!
//! HTTP/JSON client for the analysis backend: telemetry reads for the
//! dashboard widgets plus the one-shot code analysis request.

use crate::backend::AnalysisBackend;
use crate::backend::error::BackendError;
use crate::consts::cli_consts::{auditor, polling};
use crate::environment::Environment;
use crate::models::{AuditReport, DashboardStats, IdentitySession, SecurityEvent, ServiceHealth};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;

// User-Agent string with console version
const USER_AGENT: &str = concat!("trustlock-console/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    code: &'a str,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    environment: Environment,
    client_id: String,
}

impl BackendClient {
    pub fn new(environment: Environment, client_id: String) -> Result<Self, BackendError> {
        let client = ClientBuilder::new()
            .connect_timeout(polling::request_timeout())
            .timeout(polling::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
            client_id,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_base_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, BackendError> {
        if !response.status().is_success() {
            return Err(BackendError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Client-Id", &self.client_id)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        timeout: std::time::Duration,
    ) -> Result<T, BackendError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Client-Id", &self.client_id)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait::async_trait]
impl AnalysisBackend for BackendClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn health(&self) -> Result<ServiceHealth, BackendError> {
        self.get_json("/").await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, BackendError> {
        self.get_json("/api/dashboard/stats").await
    }

    async fn events(&self) -> Result<Vec<SecurityEvent>, BackendError> {
        self.get_json("/api/events").await
    }

    async fn identity_sessions(&self) -> Result<Vec<IdentitySession>, BackendError> {
        self.get_json("/api/identity/sessions").await
    }

    async fn analyze_code(&self, code: &str) -> Result<AuditReport, BackendError> {
        // Analysis runs a model-backed scan server-side; give it a longer
        // timeout than the telemetry reads.
        self.post_json(
            "/api/auditor/analyze",
            &AnalyzeRequest { code },
            auditor::analyze_timeout(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_cleanly() {
        let client = BackendClient::new(
            Environment::Custom {
                api_base_url: "http://localhost:8000/".to_string(),
            },
            "test-client".to_string(),
        )
        .unwrap();

        assert_eq!(
            client.build_url("/api/events"),
            "http://localhost:8000/api/events"
        );
        assert_eq!(client.build_url("api/events"), "http://localhost:8000/api/events");
        assert_eq!(client.build_url("/"), "http://localhost:8000/");
    }
}
