//! Application configuration.
//!
//! Loaded once from config.json next to the executable and passed to the
//! components that need it. Every field has a default, so a missing or
//! partial file still yields a working configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tesseract executable; searched on PATH and in the standard install
    /// directories when unset
    pub tesseract_path: Option<PathBuf>,
    /// Directory holding eng.traineddata
    pub tessdata_dir: Option<PathBuf>,
    /// Write every processed capture to the debug image directory
    pub save_debug_images: bool,
    /// Delay before the next cycle after an augment round was seen
    pub phase_delay_ms: u64,
    /// Delay before the next cycle otherwise
    pub idle_delay_ms: u64,
    /// Overlay font size in points
    pub font_size: f32,
    /// Overlay text colour (RGB)
    pub text_color: [u8; 3],
    /// Minimum age in days before reference data is fetched again
    pub refresh_interval_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            tessdata_dir: None,
            save_debug_images: true,
            phase_delay_ms: 3000,
            idle_delay_ms: 5000,
            font_size: 33.0,
            text_color: [255, 0, 0],
            refresh_interval_days: 1,
        }
    }
}

impl AppConfig {
    pub fn phase_delay(&self) -> Duration {
        Duration::from_millis(self.phase_delay_ms)
    }

    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", path.display()));

        if !path.exists() {
            crate::log("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
                Self::default()
            }
        }
    }

    /// Loads config.json from next to the executable.
    pub fn load() -> Self {
        Self::load_from(&crate::paths::get_config_path())
    }
}
