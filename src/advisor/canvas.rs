use eframe::egui;
use std::sync::{Arc, Mutex};

/// A piece of text to draw on the overlay, centered at `(x, y)` in
/// physical screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Labels shared between the overlay worker and the window painting them.
pub type SharedLabels = Arc<Mutex<Vec<OverlayLabel>>>;

/// Where the display loop draws its results.
pub trait Canvas: Send {
    fn clear(&mut self);
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
}

/// Publishes labels to the overlay viewport and asks it to repaint.
pub struct OverlayCanvas {
    labels: SharedLabels,
    repaint: Option<egui::Context>,
}

impl OverlayCanvas {
    pub fn new(labels: SharedLabels, repaint: Option<egui::Context>) -> Self {
        Self { labels, repaint }
    }

    fn changed(&self) {
        if let Some(ctx) = &self.repaint {
            // The overlay is an immediate viewport, drawn by the root's update
            ctx.request_repaint_of(egui::ViewportId::ROOT);
        }
    }
}

impl Canvas for OverlayCanvas {
    fn clear(&mut self) {
        if let Ok(mut labels) = self.labels.lock() {
            if labels.is_empty() {
                return;
            }
            labels.clear();
        }
        self.changed();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        if let Ok(mut labels) = self.labels.lock() {
            labels.push(OverlayLabel {
                x,
                y,
                text: text.to_string(),
            });
        }
        self.changed();
    }
}
