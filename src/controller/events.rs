//! Controller events — broadcast channel for the TUI and observers.
//!
//! Best-effort delivery: if a subscriber falls behind, `Lagged` errors
//! skip events. Nothing in the controller depends on anyone listening.

/// Events emitted by the controller for observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskEvent {
    /// The backend confirmed the camera is running.
    CameraStarted,
    /// The backend confirmed the camera stopped.
    CameraStopped,
    /// A status poll succeeded.
    StatusPolled {
        name: Option<String>,
        faces: Option<String>,
        status: Option<String>,
    },
    /// A status poll failed; the poller keeps going.
    PollFailed { error: String },
    /// A user action could not reach the backend.
    RequestFailed { action: &'static str, error: String },
    /// A toast was shown.
    Notified { id: u64, message: String },
}

/// Channel capacity for the event broadcast.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
