//! Overlay runner: owns the worker thread that steps the display loop.
//!
//! The control window starts and stops the loop through an
//! [`OverlayHandle`]. `stop()` only sends the request and returns at once;
//! the loop notices it at its next step or during its current wait. The
//! thread is joined when the handle is dropped.

use anyhow::{anyhow, Result};
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::canvas::{OverlayCanvas, SharedLabels};
use super::display::{DisplayLoop, DisplayState};
use super::reader::ScreenReader;
use crate::capture::PrimaryMonitor;
use crate::config::AppConfig;
use crate::data::SettingsStore;
use crate::ocr::{Tesseract, TesseractPaths};

/// Receiving end of a stop request.
pub struct StopSignal(Receiver<()>);

impl StopSignal {
    /// Sleeps for up to `timeout`. Returns true if a stop was requested
    /// (or the requesting side is gone) in the meantime.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.0.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }

    /// Non-blocking check for a pending stop request.
    pub fn requested(&self) -> bool {
        match self.0.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => true,
            Err(TryRecvError::Empty) => false,
        }
    }
}

pub fn stop_channel() -> (Sender<()>, StopSignal) {
    let (tx, rx) = mpsc::channel();
    (tx, StopSignal(rx))
}

/// A running overlay worker.
pub struct OverlayHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
    status: Arc<Mutex<String>>,
}

impl OverlayHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Current state of the display loop, for the status line.
    pub fn status(&self) -> String {
        self.status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|_| "Unknown".to_string())
    }

    /// Requests a stop without waiting for the worker. An in-flight
    /// capture or OCR call finishes first; poll `is_running()` to see
    /// when the worker is gone.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    fn join(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if let Err(e) = thread.join() {
                crate::log(&format!("Overlay thread panicked: {:?}", e));
            }
        }
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.join();
    }
}

/// Starts the display loop on a worker thread, drawing into `labels`.
pub fn start_overlay(
    config: &AppConfig,
    tesseract: TesseractPaths,
    store: SettingsStore,
    labels: SharedLabels,
    repaint: Option<egui::Context>,
) -> Result<OverlayHandle> {
    let debug_dir = config
        .save_debug_images
        .then(crate::paths::get_debug_image_dir);
    let reader = ScreenReader::new(
        Box::new(PrimaryMonitor),
        Box::new(Tesseract::new(tesseract)),
        debug_dir,
    );
    let canvas = OverlayCanvas::new(labels, repaint);
    let (stop_tx, stop) = stop_channel();

    let display = DisplayLoop::new(reader, store, Box::new(canvas), stop, config);
    spawn_display_loop(display, stop_tx)
}

fn spawn_display_loop(mut display: DisplayLoop, stop_tx: Sender<()>) -> Result<OverlayHandle> {
    let running = Arc::new(AtomicBool::new(true));
    let status = Arc::new(Mutex::new(display.state.to_string()));

    let thread_running = running.clone();
    let thread_status = status.clone();
    let thread = thread::Builder::new()
        .name("overlay".to_string())
        .spawn(move || {
            crate::log("Overlay started");
            loop {
                match display.step() {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        crate::log(&format!("Overlay error: {}", e));
                        display.state = DisplayState::Error(e.to_string());
                        break;
                    }
                }
                if let Ok(mut s) = thread_status.lock() {
                    *s = display.state.to_string();
                }
            }

            if let Ok(mut s) = thread_status.lock() {
                *s = display.state.to_string();
            }
            if let DisplayState::Error(msg) = &display.state {
                crate::log(&format!("Overlay failed: {}", msg));
            }
            crate::log(&format!("Overlay finished after {} cycles", display.cycles));
            thread_running.store(false, Ordering::SeqCst);
        })
        .map_err(|e| anyhow!("Failed to spawn overlay thread: {}", e))?;

    Ok(OverlayHandle {
        stop: Some(stop_tx),
        thread: Some(thread),
        running,
        status,
    })
}
