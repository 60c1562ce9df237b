//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, hands the controller a channel-backed surface, runs
//! the main TEA loop. Actions run as spawned tasks so a slow backend
//! never blocks input or rendering.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::config::KioskConfig;
use crate::controller::KioskController;
use crate::surface::ChannelSurface;

use super::app::KioskApp;
use super::event::KioskMessage;
use super::layout;

/// Run side effects the model queued during the last update.
pub fn drain_pending(app: &mut KioskApp, controller: &Arc<KioskController>) {
    if let Some(action) = app.take_action() {
        let controller = controller.clone();
        tokio::spawn(async move {
            controller.dispatch(action).await;
        });
    }
    if let Some(url) = app.take_open() {
        info!("opening {url}");
        if let Err(e) = open::that(&url) {
            warn!("Failed to open {url}: {e}");
        }
    }
}

/// Read crossterm key events on a blocking thread and forward them.
///
/// The reader exits once the receiving end is dropped.
fn spawn_key_reader() -> mpsc::UnboundedReceiver<KeyEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
                continue;
            }
            if let Ok(Event::Key(key)) = event::read() {
                // Windows also reports releases.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if tx.send(key).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(backend: Arc<dyn Backend>, config: &KioskConfig) -> anyhow::Result<()> {
    let (surface, mut surface_rx) = ChannelSurface::new();
    let controller = Arc::new(KioskController::from_config(
        backend,
        Arc::new(surface),
        config,
    ));
    let mut event_rx = controller.subscribe();
    let mut app = KioskApp::new(config.base_url.clone());

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut key_rx = spawn_key_reader();
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        tokio::select! {
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, &app))?;
            }
            Some(update) = surface_rx.recv() => {
                app.update(KioskMessage::Surface(update));
            }
            result = event_rx.recv() => {
                match result {
                    Ok(event) => app.update(KioskMessage::Controller(event)),
                    Err(RecvError::Lagged(n)) => warn!("TUI skipped {n} controller events"),
                    Err(RecvError::Closed) => app.update(KioskMessage::Quit),
                }
            }
            Some(key) = key_rx.recv() => {
                app.update(KioskMessage::Input(key));
            }
        }

        drain_pending(&mut app, &controller);

        if app.should_quit {
            break;
        }
    }

    // Leave the backend camera as it is; only our poller goes away.
    drop(controller);

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
