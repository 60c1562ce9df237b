//! Toast notifications — single slot, latest wins.
//!
//! Every toast takes the next id from a monotonic counter and spawns a
//! hide timer. When the timer fires it hides the banner only if no newer
//! toast has been shown since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::surface::Surface;

/// How long a toast stays visible by default.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Clone)]
pub struct Toaster {
    surface: Arc<dyn Surface>,
    latest: Arc<AtomicU64>,
    hide_after: Duration,
}

impl Toaster {
    pub fn new(surface: Arc<dyn Surface>, hide_after: Duration) -> Self {
        Self {
            surface,
            latest: Arc::new(AtomicU64::new(0)),
            hide_after,
        }
    }

    /// Show `message` now and schedule its hide. Returns the toast id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: &str) -> u64 {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface.show_toast(message);

        let surface = self.surface.clone();
        let latest = self.latest.clone();
        let hide_after = self.hide_after;
        tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            if latest.load(Ordering::SeqCst) == id {
                surface.hide_toast();
            }
        });
        id
    }

    /// Id of the most recent toast (0 before the first).
    pub fn latest_id(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
