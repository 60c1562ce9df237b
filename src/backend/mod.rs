//! Kiosk backend — the HTTP API that owns the camera and the recognizer.
//!
//! The controller only ever talks to the backend through the `Backend`
//! trait. `HttpBackend` is the real implementation; tests plug in
//! scripted ones.

pub mod client;
pub mod types;

use async_trait::async_trait;

pub use client::HttpBackend;
pub use types::{ActionResponse, FaceCount, StatusResponse};

/// Errors from backend requests.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// The endpoints a kiosk controller consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// POST /start_camera
    async fn start_camera(&self) -> Result<ActionResponse, BackendError>;

    /// POST /stop_camera
    async fn stop_camera(&self) -> Result<ActionResponse, BackendError>;

    /// GET /status
    async fn status(&self) -> Result<StatusResponse, BackendError>;

    /// POST /capture_register with form field `name`.
    async fn capture_register(&self, name: &str) -> Result<ActionResponse, BackendError>;

    /// POST /train
    async fn train(&self) -> Result<ActionResponse, BackendError>;

    /// POST /mark_attendance
    async fn mark_attendance(&self) -> Result<ActionResponse, BackendError>;

    /// Stream source for the live camera feed.
    fn video_feed_url(&self) -> String;

    /// Navigation target for today's attendance report.
    fn download_url(&self) -> String;
}
