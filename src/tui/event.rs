//! TUI messages — everything that can change the model.
//!
//! The runner multiplexes:
//! - crossterm keyboard events
//! - surface updates from the controller
//! - controller broadcast events
//!
//! Frames are drawn straight from the runner's render interval.

use crossterm::event::KeyEvent;

use crate::controller::KioskEvent;
use crate::surface::SurfaceUpdate;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum KioskMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// The controller wrote to the surface.
    Surface(SurfaceUpdate),
    /// Controller event (poll failure, camera started, ...).
    Controller(KioskEvent),
    /// Quit the TUI.
    Quit,
}
