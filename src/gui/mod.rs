//! GUI module for the application.
//!
//! A small control window (rank selector, run/pause toggle, status) plus,
//! while the overlay runs, a fullscreen transparent viewport that shows
//! the statistics over the game.

pub mod render;
pub mod state;

use std::time::Duration;

use eframe::egui::{self, Vec2};

use crate::advisor::{start_overlay, OverlayHandle, SharedLabels};
use crate::config::AppConfig;
use crate::data::{Rank, SettingsStore};
use crate::ocr::TesseractPaths;

use state::{GuiState, OverlayStatus};

/// Main GUI application struct.
pub struct GuiApp {
    state: GuiState,
    config: AppConfig,
    store: SettingsStore,
    /// `None` when Tesseract could not be set up at startup
    tesseract: Option<TesseractPaths>,
    overlay: Option<OverlayHandle>,
    /// Paused workers still finishing their current step
    stopping: Vec<OverlayHandle>,
    labels: SharedLabels,
}

impl GuiApp {
    pub fn new(config: AppConfig, store: SettingsStore, tesseract: Option<TesseractPaths>) -> Self {
        let mut state = GuiState::default();
        match store.load() {
            Ok(settings) => state.rank = settings.rank,
            Err(e) => crate::log(&format!("GUI: Failed to load settings: {:#}", e)),
        }

        Self {
            state,
            config,
            store,
            tesseract,
            overlay: None,
            stopping: Vec::new(),
            labels: SharedLabels::default(),
        }
    }

    fn handle_rank_change(&mut self, rank: Rank) {
        self.state.rank = rank;
        if let Err(e) = self.store.set_rank(rank) {
            crate::log(&format!("GUI: Failed to save rank: {:#}", e));
            self.state.status = OverlayStatus::Error(format!("Failed to save rank: {}", e));
        }
    }

    fn handle_toggle(&mut self, ctx: &egui::Context) {
        if self.overlay.is_some() {
            self.handle_pause();
        } else {
            self.handle_run(ctx);
        }
    }

    fn handle_run(&mut self, ctx: &egui::Context) {
        let Some(tesseract) = self.tesseract.clone() else {
            self.state.status = OverlayStatus::Error("Tesseract not available".to_string());
            return;
        };

        // A paused worker may still be mid-step; it keeps the old labels
        self.labels = SharedLabels::default();

        match start_overlay(
            &self.config,
            tesseract,
            self.store.clone(),
            self.labels.clone(),
            Some(ctx.clone()),
        ) {
            Ok(handle) => {
                self.state.status = OverlayStatus::Running(handle.status());
                self.overlay = Some(handle);
                crate::log("GUI: Overlay running");
            }
            Err(e) => {
                self.state.status = OverlayStatus::Error(e.to_string());
                crate::log(&format!("GUI: Failed to start overlay: {}", e));
            }
        }
    }

    fn handle_pause(&mut self) {
        if let Some(mut handle) = self.overlay.take() {
            handle.stop();
            self.stopping.push(handle);
        }
        if let Ok(mut labels) = self.labels.lock() {
            labels.clear();
        }
        self.state.status = OverlayStatus::Paused;
        crate::log("GUI: Overlay paused");
    }

    /// Polls the worker; a worker that exited on its own is reported.
    /// Paused workers are dropped once they have exited.
    fn update_overlay_status(&mut self) {
        self.stopping.retain(OverlayHandle::is_running);

        let Some(handle) = &self.overlay else {
            return;
        };

        if handle.is_running() {
            self.state.status = OverlayStatus::Running(handle.status());
        } else {
            let last = handle.status();
            self.overlay = None;
            self.state.status = OverlayStatus::Error(last);
        }
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        let labels = self
            .labels
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default();
        let font_size = self.config.font_size;
        let color = self.config.text_color;

        let mut close_requested = false;
        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("overlay"),
            egui::ViewportBuilder::default()
                .with_title("TFT Augments Overlay")
                .with_transparent(true)
                .with_decorations(false)
                .with_always_on_top()
                .with_mouse_passthrough(true)
                .with_fullscreen(true)
                .with_taskbar(false),
            |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| {
                        render::paint_labels(ui, &labels, font_size, color);
                    });
                if ctx.input(|i| i.viewport().close_requested()) {
                    close_requested = true;
                }
            },
        );

        if close_requested {
            self.handle_pause();
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_overlay_status();

        if ctx.input(|i| i.key_pressed(egui::Key::F3)) {
            self.handle_toggle(ctx);
        }

        // Status polling
        if self.state.status.is_running() || !self.stopping.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("TFT Augments Helper");
            ui.add_space(16.0);

            let (new_rank, toggle_clicked) = render::render_controls(ui, &self.state);
            if let Some(rank) = new_rank {
                self.handle_rank_change(rank);
            }
            if toggle_clicked {
                self.handle_toggle(ctx);
            }

            render::render_status(ui, &self.state);
        });

        if self.overlay.is_some() {
            self.show_overlay(ctx);
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // The overlay viewport must stay see-through
        [0.0, 0.0, 0.0, 0.0]
    }
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui(
    config: AppConfig,
    store: SettingsStore,
    tesseract: Option<TesseractPaths>,
) -> eframe::Result<()> {
    crate::log("GUI: Creating native options...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(320.0, 200.0))
            .with_min_inner_size(Vec2::new(280.0, 160.0))
            .with_title("TFT Augments Helper"),
        ..Default::default()
    };

    eframe::run_native(
        "TFT Augments Helper",
        options,
        Box::new(move |_cc| {
            crate::log("GUI: Creating GuiApp instance...");
            Ok(Box::new(GuiApp::new(config, store, tesseract)))
        }),
    )
}
