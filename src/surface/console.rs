//! Line-oriented surface for one-shot CLI commands.

use tracing::warn;

use super::Surface;

/// Prints toasts and chip changes to stdout. Navigation opens the
/// system browser.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn set_chip(&self, text: &str) {
        println!("[{text}]");
    }

    fn set_name(&self, name: &str) {
        println!("name:  {name}");
    }

    fn set_faces(&self, faces: &str) {
        println!("faces: {faces}");
    }

    fn show_toast(&self, message: &str) {
        println!("{message}");
    }

    fn navigate(&self, url: &str) {
        println!("Opening {url}");
        if let Err(e) = open::that(url) {
            warn!("Failed to open {url}: {e}");
        }
    }
}
