use anyhow::{anyhow, Result};
use image::GrayImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::TesseractPaths;

/// Tesseract page segmentation mode (`--psm`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSegMode(pub u8);

impl PageSegMode {
    /// Assume a single uniform block of text.
    pub const SINGLE_BLOCK: PageSegMode = PageSegMode(6);

    /// Modes tried by round detection, finest first: 13, 12, ..., 6.
    pub fn round_detection_order() -> impl Iterator<Item = PageSegMode> {
        (6..=13).rev().map(PageSegMode)
    }
}

impl std::fmt::Display for PageSegMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "--psm {}", self.0)
    }
}

/// Turns a binarized image into text.
pub trait TextRecognizer: Send {
    fn extract_text(&self, img: &GrayImage, mode: PageSegMode) -> Result<String>;
}

/// Runs the Tesseract command line tool.
#[derive(Clone, Debug)]
pub struct Tesseract {
    executable: PathBuf,
    tessdata: Option<PathBuf>,
}

impl Tesseract {
    pub fn new(paths: TesseractPaths) -> Self {
        Self {
            executable: paths.executable,
            tessdata: paths.tessdata,
        }
    }
}

impl TextRecognizer for Tesseract {
    fn extract_text(&self, img: &GrayImage, mode: PageSegMode) -> Result<String> {
        if img.width() == 0 || img.height() == 0 {
            return Ok(String::new());
        }

        let temp_input = NamedTempFile::with_suffix(".png")?;
        img.save(temp_input.path())?;

        let mut command = Command::new(&self.executable);
        command.arg(temp_input.path()).arg("stdout");
        if let Some(tessdata) = &self.tessdata {
            command.arg("--tessdata-dir").arg(tessdata);
        }
        let output = command
            .arg("-l")
            .arg("eng")
            .arg("--psm")
            .arg(mode.0.to_string())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed ({}): {}", mode, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
