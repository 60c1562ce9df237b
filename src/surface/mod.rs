//! Render surface — the screen elements a kiosk controller writes to.
//!
//! The controller never owns a display. It is handed a `Surface` and
//! pushes text into it. Every method has a no-op default so a surface
//! only implements the elements it actually has.

pub mod console;

use tokio::sync::mpsc;

pub use console::ConsoleSurface;

/// Render targets driven by the controller.
pub trait Surface: Send + Sync {
    /// Point the video display at a stream, or clear it with `None`.
    fn set_video_source(&self, _src: Option<&str>) {}

    /// Replace the status chip text.
    fn set_chip(&self, _text: &str) {}

    /// Replace the recognized-name display.
    fn set_name(&self, _name: &str) {}

    /// Replace the face-count display.
    fn set_faces(&self, _faces: &str) {}

    /// Make the toast banner visible with `message`.
    fn show_toast(&self, _message: &str) {}

    /// Hide the toast banner.
    fn hide_toast(&self) {}

    /// Full navigation to `url` (report download).
    fn navigate(&self, _url: &str) {}
}

/// One surface mutation, as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceUpdate {
    VideoSource(Option<String>),
    Chip(String),
    Name(String),
    Faces(String),
    ShowToast(String),
    HideToast,
    Navigate(String),
}

/// Surface that forwards every mutation over an mpsc channel.
///
/// Used by the TUI: the runner owns the receiving end and folds updates
/// into its model between frames.
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    tx: mpsc::UnboundedSender<SurfaceUpdate>,
}

impl ChannelSurface {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SurfaceUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, update: SurfaceUpdate) {
        // Receiver gone means the UI already shut down.
        let _ = self.tx.send(update);
    }
}

impl Surface for ChannelSurface {
    fn set_video_source(&self, src: Option<&str>) {
        self.send(SurfaceUpdate::VideoSource(src.map(str::to_string)));
    }

    fn set_chip(&self, text: &str) {
        self.send(SurfaceUpdate::Chip(text.into()));
    }

    fn set_name(&self, name: &str) {
        self.send(SurfaceUpdate::Name(name.into()));
    }

    fn set_faces(&self, faces: &str) {
        self.send(SurfaceUpdate::Faces(faces.into()));
    }

    fn show_toast(&self, message: &str) {
        self.send(SurfaceUpdate::ShowToast(message.into()));
    }

    fn hide_toast(&self) {
        self.send(SurfaceUpdate::HideToast);
    }

    fn navigate(&self, url: &str) {
        self.send(SurfaceUpdate::Navigate(url.into()));
    }
}
