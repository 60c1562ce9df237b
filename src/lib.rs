//! Kiosk — terminal controller for a face-recognition attendance kiosk.
//!
//! Drives a remote kiosk backend (camera, recognizer, attendance log)
//! over HTTP and renders its state on an injectable surface.

pub mod backend;
pub mod config;
pub mod controller;
pub mod surface;
pub mod tui;
