//! Status poller — the recurring GET /status while the camera is live.
//!
//! One spawned task per poller. Between polls it waits on either the
//! interval timer or its stop signal, so `stop()` ends it within one
//! interval. A request already in flight is allowed to finish; no new
//! one is issued after the stop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::backend::{Backend, StatusResponse};
use crate::surface::Surface;

use super::events::KioskEvent;

/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(600);

/// Handle to a running poll task.
pub struct Poller {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Poller {
    /// Spawn the poll loop. Must be called from within a tokio runtime.
    pub fn spawn(
        backend: Arc<dyn Backend>,
        surface: Arc<dyn Surface>,
        events: broadcast::Sender<KioskEvent>,
        interval: Duration,
    ) -> Self {
        let (stop, stop_rx) = watch::channel(false);
        let task = tokio::spawn(poll_loop(backend, surface, events, interval, stop_rx));
        Self { stop, task }
    }

    /// Whether the poll task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Signal the loop to exit. Does not wait for it.
    pub fn stop(self) {
        let _ = self.stop.send(true);
    }
}

async fn poll_loop(
    backend: Arc<dyn Backend>,
    surface: Arc<dyn Surface>,
    events: broadcast::Sender<KioskEvent>,
    interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    debug!("status poller started ({}ms)", interval.as_millis());
    loop {
        if *stop_rx.borrow() {
            break;
        }

        match backend.status().await {
            Ok(status) => {
                apply_status(surface.as_ref(), &status);
                let _ = events.send(KioskEvent::StatusPolled {
                    name: status.name,
                    faces: status.faces.map(|f| f.to_string()),
                    status: status.status,
                });
            }
            Err(e) => {
                debug!("status poll failed: {e}");
                let _ = events.send(KioskEvent::PollFailed {
                    error: e.to_string(),
                });
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            // Fires on stop, or when the handle is dropped.
            _ = stop_rx.changed() => break,
        }
    }
    debug!("status poller stopped");
}

/// Copy the fields a status response carries onto the surface.
pub fn apply_status(surface: &dyn Surface, status: &StatusResponse) {
    if let Some(name) = &status.name {
        surface.set_name(name);
    }
    if let Some(faces) = &status.faces {
        surface.set_faces(&faces.to_string());
    }
    if let Some(text) = status.status.as_deref().filter(|s| !s.is_empty()) {
        surface.set_chip(text);
    }
}
