//! TFT Augments Helper
//!
//! Reads the augment choices off the screen during augment rounds and
//! shows each augment's average placement, win rate and pick rate over
//! the game.

// Hide console window on Windows for GUI mode
#![windows_subsystem = "windows"]

mod advisor;
mod capture;
mod config;
mod data;
mod gui;
mod matching;
mod ocr;
mod paths;

use anyhow::{anyhow, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

use config::AppConfig;
use data::{needs_refresh, refresh_reference_data, MobalyticsSource, SettingsStore};

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("tft_augments_helper.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("tft_augments_helper.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    paths::ensure_directories()?;
    log("TFT Augments Helper starting");

    let config = AppConfig::load();
    let store = SettingsStore::new(paths::get_settings_path());

    refresh_if_stale(&config, &store);

    let tesseract = match ocr::ensure_tesseract(&config) {
        Ok(paths) => Some(paths),
        Err(e) => {
            log(&format!("Warning: Failed to setup Tesseract: {:#}", e));
            log("The overlay cannot run until Tesseract is installed.");
            None
        }
    };

    gui::run_gui(config, store, tesseract).map_err(|e| anyhow!("GUI error: {}", e))?;

    log("Exiting");
    Ok(())
}

/// Fetches fresh reference statistics when the stored ones are older than
/// the configured interval. Failures leave the stored data in place.
fn refresh_if_stale(config: &AppConfig, store: &SettingsStore) {
    let last = match store.load() {
        Ok(settings) => settings.fetch_last_update,
        Err(e) => {
            log(&format!("Failed to load settings: {:#}", e));
            return;
        }
    };

    let today = Local::now().date_naive();
    if !needs_refresh(last, today, config.refresh_interval_days) {
        log(&format!("Reference data is current (last fetched {:?})", last));
        return;
    }

    log("Fetching reference data...");
    let result = MobalyticsSource::new()
        .and_then(|source| refresh_reference_data(&source, store, today));
    if let Err(e) = result {
        log(&format!("Failed to fetch reference data: {:#}", e));
    }
}
