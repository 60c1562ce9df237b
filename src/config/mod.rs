//! Kiosk configuration — backend address and UI timings.
//!
//! User-level config: `~/.kiosk/config.yaml`
//! Project-level config: `.kiosk/config.yaml` (overrides user values)
//!
//! Resolution: defaults → user file → project file → `KIOSK_URL` env var.
//! The CLI `--url` flag is applied last by `main`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::client::DEFAULT_BASE_URL;

/// Environment variable overriding the backend URL.
pub const URL_ENV: &str = "KIOSK_URL";

const DEFAULT_POLL_INTERVAL_MS: u64 = 600;
const DEFAULT_TOAST_MS: u64 = 2500;

/// Fully resolved kiosk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub toast_ms: u64,
}

/// One config file on disk. Every field is optional so files can layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poll_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toast_ms: Option<u64>,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

/// Path to `~/.kiosk/`.
fn dirs_path() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".kiosk"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".kiosk"))
    }
}

impl KioskConfig {
    /// Load config from disk, merging user + project files, then the env var.
    pub fn load() -> Self {
        let mut config = Self::default();
        if let Some(dir) = dirs_path() {
            config.merge(read_file(&dir.join("config.yaml")));
        }
        config.merge(read_file(Path::new(".kiosk/config.yaml")));
        config.apply_url_override(std::env::var(URL_ENV).ok());
        config
    }

    /// Load defaults overlaid with one explicit file, then the env var.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_url_override(std::env::var(URL_ENV).ok());
        Ok(config)
    }

    /// Parse a (possibly partial) YAML document over the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let file: ConfigFile =
            serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))?;
        let mut config = Self::default();
        config.merge(file);
        Ok(config)
    }

    /// Replace the backend URL when `url` is set and non-empty.
    pub fn apply_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    fn merge(&mut self, file: ConfigFile) {
        if let Some(url) = file.base_url {
            self.base_url = url;
        }
        // A zero interval would spin the poller.
        if let Some(ms) = file.poll_interval_ms.filter(|ms| *ms > 0) {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = file.toast_ms {
            self.toast_ms = ms;
        }
    }
}

/// Read one layer; a missing or malformed file contributes nothing.
fn read_file(path: &Path) -> ConfigFile {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {e}", path.display());
            ConfigFile::default()
        }),
        Err(_) => ConfigFile::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_kiosk_page() {
        let config = KioskConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.poll_interval(), Duration::from_millis(600));
        assert_eq!(config.toast_duration(), Duration::from_millis(2500));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = KioskConfig::from_yaml("base_url: http://kiosk.lan:5000\n").unwrap();
        assert_eq!(config.base_url, "http://kiosk.lan:5000");
        assert_eq!(config.poll_interval_ms, 600);
        assert_eq!(config.toast_ms, 2500);
    }

    #[test]
    fn zero_poll_interval_ignored() {
        let config = KioskConfig::from_yaml("poll_interval_ms: 0\ntoast_ms: 1000\n").unwrap();
        assert_eq!(config.poll_interval_ms, 600);
        assert_eq!(config.toast_ms, 1000);
    }

    #[test]
    fn malformed_yaml_is_error() {
        assert!(KioskConfig::from_yaml("poll_interval_ms: [fast]").is_err());
    }

    #[test]
    fn layers_merge_in_order() {
        let mut config = KioskConfig::default();
        config.merge(ConfigFile {
            base_url: Some("http://user".into()),
            poll_interval_ms: Some(1000),
            toast_ms: None,
        });
        config.merge(ConfigFile {
            base_url: Some("http://project".into()),
            ..Default::default()
        });
        assert_eq!(config.base_url, "http://project");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.toast_ms, 2500);
    }

    #[test]
    fn url_override_skips_blank() {
        let mut config = KioskConfig::default();
        config.apply_url_override(Some("  ".into()));
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        config.apply_url_override(None);
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        config.apply_url_override(Some(" http://10.0.0.5:5000 ".into()));
        assert_eq!(config.base_url, "http://10.0.0.5:5000");
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "base_url: http://kiosk.lan\npoll_interval_ms: 750\n").unwrap();

        let back = read_file(&path);
        assert_eq!(back.base_url.as_deref(), Some("http://kiosk.lan"));
        assert_eq!(back.poll_interval_ms, Some(750));
        assert!(back.toast_ms.is_none());

        let config = KioskConfig::load_from(&path).unwrap();
        assert_eq!(config.poll_interval_ms, 750);
        assert_eq!(config.toast_ms, 2500);
    }

    #[test]
    fn malformed_file_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "toast_ms: soon\n").unwrap();
        assert!(read_file(&path).toast_ms.is_none());
    }

    #[test]
    fn missing_file_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let file = read_file(&dir.path().join("absent.yaml"));
        assert!(file.base_url.is_none());
        assert!(KioskConfig::load_from(&dir.path().join("absent.yaml")).is_err());
    }
}
