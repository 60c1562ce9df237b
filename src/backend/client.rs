//! Raw HTTP client for the kiosk backend.
//!
//! No controller awareness — just makes API calls via reqwest.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::types::{ActionResponse, StatusResponse};
use super::{Backend, BackendError};

/// Default backend address (the Flask dev server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// reqwest-backed implementation of [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client against the default local backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.into())
    }

    /// Create a client with a custom base URL. A trailing slash is dropped.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST an endpoint with no body and decode the action envelope.
    async fn post_action(&self, path: &str) -> Result<ActionResponse, BackendError> {
        let response = self.http.post(self.url(path)).send().await?;
        decode(response).await
    }

    /// Download today's report (PDF) as raw bytes.
    pub async fn fetch_today_report(&self) -> Result<Vec<u8>, BackendError> {
        let response = self.http.get(self.download_url()).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a >= 400 status into `BackendError::Api`.
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status().as_u16();
    if status >= 400 {
        let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
        return Err(BackendError::Api {
            status,
            message: body,
        });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| BackendError::InvalidResponse(format!("failed to parse response: {e}")))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn start_camera(&self) -> Result<ActionResponse, BackendError> {
        self.post_action("/start_camera").await
    }

    async fn stop_camera(&self) -> Result<ActionResponse, BackendError> {
        self.post_action("/stop_camera").await
    }

    async fn status(&self) -> Result<StatusResponse, BackendError> {
        let response = self.http.get(self.url("/status")).send().await?;
        decode(response).await
    }

    async fn capture_register(&self, name: &str) -> Result<ActionResponse, BackendError> {
        let response = self
            .http
            .post(self.url("/capture_register"))
            .form(&[("name", name)])
            .send()
            .await?;
        decode(response).await
    }

    async fn train(&self) -> Result<ActionResponse, BackendError> {
        self.post_action("/train").await
    }

    async fn mark_attendance(&self) -> Result<ActionResponse, BackendError> {
        self.post_action("/mark_attendance").await
    }

    fn video_feed_url(&self) -> String {
        self.url("/video_feed")
    }

    fn download_url(&self) -> String {
        self.url("/download_today")
    }
}
