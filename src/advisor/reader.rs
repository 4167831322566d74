use anyhow::Result;
use image::GrayImage;
use std::path::PathBuf;

use crate::capture::{capture_region, CaptureRect, ScreenResolution, ScreenSource};
use crate::ocr::{PageSegMode, TextRecognizer};

/// Screen capture plus OCR, owned by the overlay worker.
pub struct ScreenReader {
    screen: Box<dyn ScreenSource>,
    ocr: Box<dyn TextRecognizer>,
    /// Where processed captures are written, if anywhere
    debug_dir: Option<PathBuf>,
}

impl ScreenReader {
    pub fn new(
        screen: Box<dyn ScreenSource>,
        ocr: Box<dyn TextRecognizer>,
        debug_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            screen,
            ocr,
            debug_dir,
        }
    }

    pub fn resolution(&self) -> Result<ScreenResolution> {
        self.screen.resolution()
    }

    /// Captures and binarizes `rect`, saving it as `debug_name` when debug
    /// images are enabled.
    pub fn capture(&self, rect: &CaptureRect, debug_name: &str) -> Result<GrayImage> {
        let debug_path = self.debug_dir.as_ref().map(|dir| dir.join(debug_name));
        capture_region(self.screen.as_ref(), rect, debug_path.as_deref())
    }

    pub fn recognize(&self, img: &GrayImage, mode: PageSegMode) -> Result<String> {
        self.ocr.extract_text(img, mode)
    }
}
