//! KioskApp — the TEA model.
//!
//! All state lives here. Update receives KioskMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.

use crate::controller::{KioskAction, KioskEvent};
use crate::surface::SurfaceUpdate;

use super::event::KioskMessage;

/// Maximum number of controller events kept for display.
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    Normal,
    /// Typing into the name field.
    EditingName,
}

/// The main TUI application state (TEA model).
#[derive(Debug)]
pub struct KioskApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status chip text.
    pub chip: String,
    /// Last recognized name.
    pub name: String,
    /// Last face count, as text.
    pub faces: String,
    /// Stream the video display points at. None = no feed.
    pub video_source: Option<String>,
    /// Visible toast. None = hidden.
    pub toast: Option<String>,
    /// Contents of the registration name field.
    pub name_input: String,
    pub input_mode: InputMode,
    /// Action waiting to be dispatched (set by input, consumed by runner).
    pub pending_action: Option<KioskAction>,
    /// URL waiting to be opened externally (consumed by runner).
    pub pending_open: Option<String>,
    /// Recent controller events (ring buffer).
    pub event_log: Vec<KioskEvent>,
    /// Status polls that failed since launch.
    pub poll_failures: u64,
    /// Backend base URL, for the title bar.
    pub backend_url: String,
}

impl KioskApp {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            chip: "Stopped".into(),
            name: "-".into(),
            faces: "0".into(),
            video_source: None,
            toast: None,
            name_input: String::new(),
            input_mode: InputMode::Normal,
            pending_action: None,
            pending_open: None,
            event_log: Vec::new(),
            poll_failures: 0,
            backend_url: backend_url.into(),
        }
    }

    /// Handle a TUI message (TEA update).
    pub fn update(&mut self, msg: KioskMessage) {
        match msg {
            KioskMessage::Input(key) => {
                super::input::handle_key(self, key);
            }
            KioskMessage::Surface(update) => {
                self.apply_surface(update);
            }
            KioskMessage::Controller(event) => {
                self.handle_controller_event(event);
            }
            KioskMessage::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn apply_surface(&mut self, update: SurfaceUpdate) {
        match update {
            SurfaceUpdate::VideoSource(src) => self.video_source = src,
            SurfaceUpdate::Chip(text) => self.chip = text,
            SurfaceUpdate::Name(name) => self.name = name,
            SurfaceUpdate::Faces(faces) => self.faces = faces,
            SurfaceUpdate::ShowToast(message) => self.toast = Some(message),
            SurfaceUpdate::HideToast => self.toast = None,
            SurfaceUpdate::Navigate(url) => self.pending_open = Some(url),
        }
    }

    fn handle_controller_event(&mut self, event: KioskEvent) {
        if let KioskEvent::PollFailed { .. } = event {
            self.poll_failures += 1;
        }
        // Successful polls arrive every interval; keep them out of the log.
        if matches!(event, KioskEvent::StatusPolled { .. }) {
            return;
        }
        self.event_log.push(event);
        if self.event_log.len() > EVENT_LOG_CAPACITY {
            self.event_log.remove(0);
        }
    }

    /// Whether the camera feed is currently shown.
    pub fn is_live(&self) -> bool {
        self.video_source.is_some()
    }

    /// Queue an action for the runner.
    pub fn request(&mut self, action: KioskAction) {
        self.pending_action = Some(action);
    }

    /// Take the pending action, if any.
    pub fn take_action(&mut self) -> Option<KioskAction> {
        self.pending_action.take()
    }

    /// Take the pending external URL, if any.
    pub fn take_open(&mut self) -> Option<String> {
        self.pending_open.take()
    }

    /// Queue the live feed for external viewing. No-op when not live.
    pub fn open_video(&mut self) {
        if let Some(src) = &self.video_source {
            self.pending_open = Some(src.clone());
        }
    }

    /// Submit the name field as a registration.
    pub fn submit_name(&mut self) {
        self.input_mode = InputMode::Normal;
        let name = self.name_input.clone();
        self.request(KioskAction::CaptureRegister(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KioskMessage {
        KioskMessage::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn app_default_state() {
        let app = KioskApp::new("http://127.0.0.1:5000");
        assert!(!app.should_quit);
        assert_eq!(app.chip, "Stopped");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.is_live());
        assert!(app.toast.is_none());
    }

    #[test]
    fn app_quit_on_ctrl_c() {
        let mut app = KioskApp::new("");
        app.input_mode = InputMode::EditingName;
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn action_keys_queue_actions() {
        let cases = [
            ('s', KioskAction::StartCamera),
            ('x', KioskAction::StopCamera),
            ('t', KioskAction::Train),
            ('m', KioskAction::MarkAttendance),
            ('d', KioskAction::DownloadToday),
        ];
        for (c, expected) in cases {
            let mut app = KioskApp::new("");
            app.update(key(KeyCode::Char(c)));
            assert_eq!(app.take_action(), Some(expected));
            assert!(app.take_action().is_none());
        }
    }

    #[test]
    fn typing_name_then_enter_registers() {
        let mut app = KioskApp::new("");
        app.update(key(KeyCode::Char('r')));
        assert_eq!(app.input_mode, InputMode::EditingName);

        for c in " Alicx".chars() {
            app.update(key(KeyCode::Char(c)));
        }
        app.update(key(KeyCode::Backspace));
        app.update(key(KeyCode::Char('e')));
        assert_eq!(app.name_input, " Alice");

        app.update(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        // Trimming is the controller's job.
        assert_eq!(
            app.take_action(),
            Some(KioskAction::CaptureRegister(" Alice".into()))
        );
    }

    #[test]
    fn escape_leaves_editing_without_action() {
        let mut app = KioskApp::new("");
        app.update(key(KeyCode::Char('r')));
        // 'q' types into the field while editing, doesn't quit
        app.update(key(KeyCode::Char('q')));
        app.update(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
        assert!(app.take_action().is_none());
        assert_eq!(app.name_input, "q");
    }

    #[test]
    fn surface_updates_apply() {
        let mut app = KioskApp::new("");
        app.update(KioskMessage::Surface(SurfaceUpdate::VideoSource(Some(
            "http://k/video_feed".into(),
        ))));
        app.update(KioskMessage::Surface(SurfaceUpdate::Chip("Live".into())));
        app.update(KioskMessage::Surface(SurfaceUpdate::Name("Alice".into())));
        app.update(KioskMessage::Surface(SurfaceUpdate::Faces("1".into())));
        app.update(KioskMessage::Surface(SurfaceUpdate::ShowToast("hi".into())));

        assert!(app.is_live());
        assert_eq!(app.chip, "Live");
        assert_eq!(app.name, "Alice");
        assert_eq!(app.faces, "1");
        assert_eq!(app.toast.as_deref(), Some("hi"));

        app.update(KioskMessage::Surface(SurfaceUpdate::HideToast));
        assert!(app.toast.is_none());
    }

    #[test]
    fn navigate_and_video_queue_urls() {
        let mut app = KioskApp::new("");
        app.update(key(KeyCode::Char('v')));
        assert!(app.take_open().is_none());

        app.update(KioskMessage::Surface(SurfaceUpdate::Navigate(
            "http://k/download_today".into(),
        )));
        assert_eq!(app.take_open().as_deref(), Some("http://k/download_today"));

        app.video_source = Some("http://k/video_feed".into());
        app.update(key(KeyCode::Char('v')));
        assert_eq!(app.take_open().as_deref(), Some("http://k/video_feed"));
    }

    #[test]
    fn poll_failures_counted_and_polls_not_logged() {
        let mut app = KioskApp::new("");
        app.update(KioskMessage::Controller(KioskEvent::PollFailed {
            error: "timeout".into(),
        }));
        app.update(KioskMessage::Controller(KioskEvent::StatusPolled {
            name: None,
            faces: None,
            status: None,
        }));
        app.update(KioskMessage::Controller(KioskEvent::CameraStarted));
        assert_eq!(app.poll_failures, 1);
        assert_eq!(app.event_log.len(), 2);
    }

    #[test]
    fn event_log_ring_buffer() {
        let mut app = KioskApp::new("");
        for i in 0..300 {
            app.update(KioskMessage::Controller(KioskEvent::Notified {
                id: i,
                message: format!("toast {i}"),
            }));
        }
        assert_eq!(app.event_log.len(), EVENT_LOG_CAPACITY);
    }

    #[test]
    fn quit_message() {
        let mut app = KioskApp::new("");
        app.update(KioskMessage::Quit);
        assert!(app.should_quit);
    }
}
