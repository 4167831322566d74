//! Control window and overlay painting.

use eframe::egui::{self, Color32, RichText};

use super::state::{GuiState, OverlayStatus};
use crate::advisor::OverlayLabel;
use crate::data::Rank;

/// Render the rank selector and the run/pause button.
/// Returns (newly selected rank, toggle clicked).
pub fn render_controls(ui: &mut egui::Ui, state: &GuiState) -> (Option<Rank>, bool) {
    let mut selected = state.rank;
    let mut toggle_clicked = false;

    ui.horizontal(|ui| {
        ui.label("Rank:");
        egui::ComboBox::from_id_salt("rank")
            .selected_text(selected.as_str())
            .show_ui(ui, |ui| {
                for rank in Rank::ALL {
                    ui.selectable_value(&mut selected, rank, rank.as_str());
                }
            });
    });

    ui.add_space(12.0);

    let label = if state.status.is_running() {
        "⏸ Pause (F3)"
    } else {
        "▶ Run (F3)"
    };
    if ui.button(RichText::new(label).size(16.0)).clicked() {
        toggle_clicked = true;
    }

    let changed = (selected != state.rank).then_some(selected);
    (changed, toggle_clicked)
}

/// Render the status line.
pub fn render_status(ui: &mut egui::Ui, state: &GuiState) {
    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    let color = match &state.status {
        OverlayStatus::Paused => Color32::GRAY,
        OverlayStatus::Running(_) => Color32::from_rgb(0, 150, 0),
        OverlayStatus::Error(_) => Color32::from_rgb(200, 0, 0),
    };

    ui.horizontal(|ui| {
        ui.label("Status:");
        ui.label(RichText::new(state.status.status_text()).color(color));
    });
}

/// Paint overlay labels. Label positions are physical pixels.
pub fn paint_labels(
    ui: &egui::Ui,
    labels: &[OverlayLabel],
    font_size: f32,
    color: [u8; 3],
) {
    let pixels_per_point = ui.ctx().pixels_per_point();
    let painter = ui.painter();
    let color = Color32::from_rgb(color[0], color[1], color[2]);

    for label in labels {
        let pos = egui::pos2(
            label.x as f32 / pixels_per_point,
            label.y as f32 / pixels_per_point,
        );
        painter.text(
            pos,
            egui::Align2::CENTER_CENTER,
            &label.text,
            egui::FontId::proportional(font_size),
            color,
        );
    }
}
