//! Practicum homework status API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{FetchCause, FetchError};
use crate::io::HttpClient;

/// Source of raw homework status payloads
#[async_trait]
pub trait StatusSource: Send + Sync + std::fmt::Debug {
    /// Fetch every homework whose status changed since `from_date` (epoch seconds).
    ///
    /// Returns the decoded JSON body untouched; shape checks belong to
    /// [`crate::response::check_response`].
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);

        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    /// Headers as they appear in error reports, with the token masked
    fn diagnostic_headers(&self) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), "OAuth ***".to_string())]
    }

    fn error(&self, cause: FetchCause) -> FetchError {
        FetchError {
            endpoint: self.endpoint.clone(),
            headers: self.diagnostic_headers(),
            cause,
        }
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let from_date = from_date.to_string();
        tracing::debug!("Requesting {} from_date={}", self.endpoint, from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
            .map_err(|e| self.error(FetchCause::Transport(e.to_string())))?;

        if response.status != 200 {
            return Err(self.error(FetchCause::Status {
                status: response.status,
                body: response.body,
            }));
        }

        serde_json::from_str::<Value>(&response.body)
            .map_err(|e| self.error(FetchCause::Decode(e.to_string())))
    }
}
