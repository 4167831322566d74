//! Augment round detection from the stage indicator ("2-1", "3-2", ...).

use super::reader::ScreenReader;
use crate::capture::{CaptureRect, ScreenResolution};
use crate::ocr::{find_round_label, is_augment_round_label, PageSegMode};

/// Size of the stage indicator region (reference pixels).
const ROUND_REGION_HEIGHT: u32 = 70;
const ROUND_REGION_WIDTH: u32 = 300;

/// Returns true if the stage indicator at `(x, y)` shows an augment round.
///
/// The region is captured once and read with page segmentation modes 13
/// down to 6, stopping at the first read that yields an augment round.
/// Capture and OCR failures count as "not an augment round".
pub fn is_augment_round(
    reader: &ScreenReader,
    x: i32,
    y: i32,
    resolution: ScreenResolution,
) -> bool {
    let rect = CaptureRect::scaled(x, y, ROUND_REGION_HEIGHT, ROUND_REGION_WIDTH, resolution);

    let img = match reader.capture(&rect, "round.png") {
        Ok(img) => img,
        Err(e) => {
            crate::log(&format!("Round check: capture failed: {}", e));
            return false;
        }
    };

    let mut last_text = String::new();
    let mut last_label: Option<String> = None;

    for mode in PageSegMode::round_detection_order() {
        let text = match reader.recognize(&img, mode) {
            Ok(text) => text,
            Err(e) => {
                crate::log(&format!("Round check: OCR failed with {}: {}", mode, e));
                continue;
            }
        };

        let label = match find_round_label(&text) {
            Ok(label) => label,
            Err(e) => {
                crate::log(&format!("Round check: {}", e));
                continue;
            }
        };

        if let Some(label) = &label {
            if is_augment_round_label(label) {
                crate::log(&format!(
                    "Augment round {} found with {} in {:?}",
                    label,
                    mode,
                    text.trim()
                ));
                return true;
            }
        }

        last_text = text;
        last_label = label;
    }

    crate::log(&format!(
        "Round {} from text {:?}",
        last_label.as_deref().unwrap_or("0"),
        last_text.trim()
    ));
    false
}
