//! Region capture: screen → cropped, binarized image ready for OCR.

use anyhow::Result;
use image::GrayImage;
use std::path::Path;

use super::resolution::{translate_distance, ScreenResolution};
use super::screen::ScreenSource;
use crate::ocr::preprocess::{binarize_for_ocr, crop_rect};

/// A rectangle in absolute screen pixels.
///
/// The origin may be negative and the extent may run past the screen edge;
/// cropping clamps to whatever is actually on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRect {
    pub x: i32,
    pub y: i32,
    pub height: u32,
    pub width: u32,
}

impl CaptureRect {
    /// Builds a rectangle whose size is given in reference-resolution units.
    pub fn scaled(
        x: i32,
        y: i32,
        reference_height: u32,
        reference_width: u32,
        resolution: ScreenResolution,
    ) -> Self {
        Self {
            x,
            y,
            height: translate_distance(reference_height, resolution),
            width: translate_distance(reference_width, resolution),
        }
    }
}

/// Captures `rect` and returns it as an inverted black/white image.
///
/// When `debug_path` is given the processed image is also written there.
/// A failed debug write is logged and otherwise ignored.
pub fn capture_region(
    screen: &dyn ScreenSource,
    rect: &CaptureRect,
    debug_path: Option<&Path>,
) -> Result<GrayImage> {
    let screenshot = screen.capture()?;
    let cropped = crop_rect(&screenshot, rect);
    let binary = binarize_for_ocr(&cropped);

    if let Some(path) = debug_path {
        if binary.width() > 0 && binary.height() > 0 {
            if let Err(e) = binary.save(path) {
                crate::log(&format!(
                    "Failed to save debug image {}: {}",
                    path.display(),
                    e
                ));
            }
        }
    }

    Ok(binary)
}
