//! Kiosk controller — turns operator actions into backend requests and
//! pushes the results onto a render surface.
//!
//! ## State
//!
//! Two things live here: the camera-active flag and the poller slot.
//! Both sit behind one short-held mutex that is never held across an
//! await. Everything else the operator sees is written straight to the
//! surface and not remembered.
//!
//! ## Lifetimes
//!
//! start → camera active, one poller spawned (a second start while the
//! poller runs reuses it). stop → camera inactive, poller signalled.
//! Dropping the controller also signals the poller.

pub mod events;
pub mod poller;
pub mod toast;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::backend::{ActionResponse, Backend, BackendError};
use crate::config::KioskConfig;
use crate::surface::Surface;

pub use events::KioskEvent;
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use toast::{Toaster, DEFAULT_TOAST_DURATION};

/// Status chip text while the camera is live.
pub const CHIP_LIVE: &str = "Live";
/// Status chip text after the camera stopped.
pub const CHIP_STOPPED: &str = "Stopped";

/// An operator action, as handed over by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskAction {
    StartCamera,
    StopCamera,
    /// Raw contents of the name field (trimmed by the controller).
    CaptureRegister(String),
    Train,
    MarkAttendance,
    DownloadToday,
}

impl KioskAction {
    pub fn label(&self) -> &'static str {
        match self {
            KioskAction::StartCamera => "start camera",
            KioskAction::StopCamera => "stop camera",
            KioskAction::CaptureRegister(_) => "register",
            KioskAction::Train => "train",
            KioskAction::MarkAttendance => "mark attendance",
            KioskAction::DownloadToday => "download",
        }
    }
}

#[derive(Default)]
struct CameraState {
    active: bool,
    poller: Option<Poller>,
}

/// The kiosk UI controller.
pub struct KioskController {
    backend: Arc<dyn Backend>,
    surface: Arc<dyn Surface>,
    toaster: Toaster,
    state: Mutex<CameraState>,
    events: broadcast::Sender<KioskEvent>,
    poll_interval: Duration,
}

impl KioskController {
    /// Create a controller with the default poll and toast timings.
    pub fn new(backend: Arc<dyn Backend>, surface: Arc<dyn Surface>) -> Self {
        Self::with_timings(backend, surface, DEFAULT_POLL_INTERVAL, DEFAULT_TOAST_DURATION)
    }

    /// Create a controller using the timings from a config.
    pub fn from_config(
        backend: Arc<dyn Backend>,
        surface: Arc<dyn Surface>,
        config: &KioskConfig,
    ) -> Self {
        Self::with_timings(backend, surface, config.poll_interval(), config.toast_duration())
    }

    pub fn with_timings(
        backend: Arc<dyn Backend>,
        surface: Arc<dyn Surface>,
        poll_interval: Duration,
        toast_duration: Duration,
    ) -> Self {
        let (events, _) = broadcast::channel(events::EVENT_CHANNEL_CAPACITY);
        Self {
            toaster: Toaster::new(surface.clone(), toast_duration),
            backend,
            surface,
            state: Mutex::new(CameraState::default()),
            events,
            poll_interval,
        }
    }

    /// Subscribe to controller events.
    pub fn subscribe(&self) -> broadcast::Receiver<KioskEvent> {
        self.events.subscribe()
    }

    /// Whether the backend last confirmed the camera as running.
    pub fn is_camera_active(&self) -> bool {
        self.lock_state().active
    }

    /// Whether a status poller is currently alive.
    pub fn is_polling(&self) -> bool {
        self.lock_state()
            .poller
            .as_ref()
            .is_some_and(Poller::is_running)
    }

    /// Show a toast and publish it.
    pub fn notify(&self, message: &str) -> u64 {
        let id = self.toaster.show(message);
        let _ = self.events.send(KioskEvent::Notified {
            id,
            message: message.to_string(),
        });
        id
    }

    /// Run any operator action.
    pub async fn dispatch(&self, action: KioskAction) {
        debug!(action = action.label(), "dispatch");
        match action {
            KioskAction::StartCamera => self.start_camera().await,
            KioskAction::StopCamera => self.stop_camera().await,
            KioskAction::CaptureRegister(name) => self.capture_register(&name).await,
            KioskAction::Train => self.train_model().await,
            KioskAction::MarkAttendance => self.mark_attendance().await,
            KioskAction::DownloadToday => self.download_today(),
        }
    }

    /// Ask the backend to start the camera; on success go live and poll.
    pub async fn start_camera(&self) {
        let Some(resp) = self.request("start camera", self.backend.start_camera()).await else {
            return;
        };
        if !resp.success {
            self.notify("❌ Failed to start camera");
            return;
        }

        let spawned = {
            let mut state = self.lock_state();
            state.active = true;
            if state.poller.as_ref().is_some_and(Poller::is_running) {
                false
            } else {
                state.poller = Some(Poller::spawn(
                    self.backend.clone(),
                    self.surface.clone(),
                    self.events.clone(),
                    self.poll_interval,
                ));
                true
            }
        };
        info!(spawned_poller = spawned, "camera started");

        self.surface
            .set_video_source(Some(self.backend.video_feed_url().as_str()));
        self.notify("✅ Camera Started");
        self.surface.set_chip(CHIP_LIVE);
        let _ = self.events.send(KioskEvent::CameraStarted);
    }

    /// Ask the backend to stop the camera; on success stop polling.
    pub async fn stop_camera(&self) {
        let Some(resp) = self.request("stop camera", self.backend.stop_camera()).await else {
            return;
        };
        if !resp.success {
            self.notify("❌ Failed to stop camera");
            return;
        }

        let poller = {
            let mut state = self.lock_state();
            state.active = false;
            state.poller.take()
        };
        if let Some(poller) = poller {
            poller.stop();
        }
        info!("camera stopped");

        self.surface.set_video_source(None);
        self.notify("🛑 Camera Stopped");
        self.surface.set_chip(CHIP_STOPPED);
        let _ = self.events.send(KioskEvent::CameraStopped);
    }

    /// Register the face currently in frame under `raw_name`.
    pub async fn capture_register(&self, raw_name: &str) {
        let name = raw_name.trim();
        if name.is_empty() {
            self.notify("❌ Enter name first");
            return;
        }

        let Some(resp) = self
            .request("register", self.backend.capture_register(name))
            .await
        else {
            return;
        };
        let fallback = if resp.success {
            "✅ Registered"
        } else {
            "❌ Registration failed"
        };
        self.notify(resp.message().unwrap_or(fallback));
    }

    /// Retrain the recognizer on all registered faces.
    pub async fn train_model(&self) {
        if let Some(resp) = self.request("train", self.backend.train()).await {
            self.notify(resp.message().unwrap_or("Training done"));
        }
    }

    /// Mark attendance for whoever the backend currently recognizes.
    pub async fn mark_attendance(&self) {
        if let Some(resp) = self
            .request("mark attendance", self.backend.mark_attendance())
            .await
        {
            self.notify(resp.message().unwrap_or("Done"));
        }
    }

    /// Navigate to today's report. No request is made from here.
    pub fn download_today(&self) {
        self.surface.navigate(&self.backend.download_url());
    }

    /// Await a backend call; transport failures become a toast and an event.
    async fn request<F>(&self, action: &'static str, call: F) -> Option<ActionResponse>
    where
        F: std::future::Future<Output = Result<ActionResponse, BackendError>>,
    {
        match call.await {
            Ok(resp) => Some(resp),
            Err(e) => {
                warn!("{action} failed: {e}");
                let _ = self.events.send(KioskEvent::RequestFailed {
                    action,
                    error: e.to_string(),
                });
                let reason = match e {
                    BackendError::Http(_) => "backend unreachable",
                    _ => "backend error",
                };
                self.notify(&format!("❌ {} failed: {reason}", capitalize(action)));
                None
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CameraState> {
        // State is two plain fields; a poisoned lock still holds valid data.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for KioskController {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(poller) = state.poller.take() {
            poller.stop();
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
