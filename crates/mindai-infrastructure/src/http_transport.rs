//! HTTP client for the solution generation backend.
//!
//! Posts JSON to `{base_url}/api/{refine,feedback,save}` and folds every
//! failure into a single human-readable [`TransportError`].

use std::time::Duration;

use async_trait::async_trait;
use mindai_core::config::BackendConfig;
use mindai_core::error::{MindaiError, Result};
use mindai_core::solution::SolutionSnapshot;
use mindai_core::transport::{
    FeedbackRequest, RefineRequest, SaveRequest, SolutionTransport, TransportError,
};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

const REFINE_PATH: &str = "/api/refine";
const FEEDBACK_PATH: &str = "/api/feedback";
const SAVE_PATH: &str = "/api/save";

/// Transport implementation backed by `reqwest`.
#[derive(Clone)]
pub struct HttpSolutionTransport {
    client: Client,
    base_url: String,
}

impl HttpSolutionTransport {
    /// Builds a client with the configured timeout.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MindaiError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<Response, TransportError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| TransportError::new(request_failure_message(&err)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body_text = response.text().await.unwrap_or_default();
        let message = error_message(status, &body_text);
        tracing::warn!(%url, status = status.as_u16(), %message, "Backend returned an error");
        Err(TransportError::with_status(status.as_u16(), message))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> std::result::Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| TransportError::new(format!("Invalid response from server: {}", err)))
    }
}

#[async_trait]
impl SolutionTransport for HttpSolutionTransport {
    async fn refine(
        &self,
        request: &RefineRequest,
    ) -> std::result::Result<SolutionSnapshot, TransportError> {
        self.post_json(REFINE_PATH, request).await
    }

    async fn submit_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> std::result::Result<(), TransportError> {
        self.post(FEEDBACK_PATH, request).await.map(|_| ())
    }

    async fn save(&self, request: &SaveRequest) -> std::result::Result<(), TransportError> {
        self.post(SAVE_PATH, request).await.map(|_| ())
    }
}

fn request_failure_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Could not reach the server".to_string()
    } else {
        format!("Request failed: {}", err)
    }
}

/// Derives the user-facing message for a non-success response.
///
/// - JSON body with a non-empty `error` string: that string
/// - JSON body without one: `"Request failed"`
/// - anything else: `"HTTP <status>"`
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Request failed".to_string()),
        Err(_) => format!("HTTP {}", status.as_u16()),
    }
}
