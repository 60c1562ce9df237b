//! Kiosk dashboard — ratatui TUI presentation layer.
//!
//! The terminal stands in for the kiosk web page: a status chip, the
//! live-feed indicator, name and face-count readouts, a name field for
//! registration, and a toast line.
//!
//! ## Architecture (TEA)
//!
//! Model (`KioskApp`) + Update (message handler) + View (render).
//! The controller never touches the model directly. It writes to a
//! `ChannelSurface` and the runner folds those updates in between frames.

pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
