//! Fakes shared by the advisor tests.

use anyhow::{anyhow, Result};
use image::{GrayImage, ImageBuffer, Rgba};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::reader::ScreenReader;
use crate::capture::region::tests::StaticScreen;
use crate::ocr::engine::{PageSegMode, TextRecognizer};

/// Answers OCR requests from a script keyed by page segmentation mode,
/// or from a queue of reads consumed in order.
pub struct ScriptedOcr {
    by_mode: HashMap<u8, String>,
    queue: Option<Arc<Mutex<Vec<String>>>>,
    failing: Vec<u8>,
    calls: Option<Arc<Mutex<Vec<u8>>>>,
    sizes: Option<Arc<Mutex<Vec<(u32, u32)>>>>,
    delay: Duration,
}

impl ScriptedOcr {
    pub fn by_mode(script: &[(u8, &str)]) -> Self {
        Self {
            by_mode: script.iter().map(|(m, t)| (*m, t.to_string())).collect(),
            queue: None,
            failing: Vec::new(),
            calls: None,
            sizes: None,
            delay: Duration::ZERO,
        }
    }

    /// Each call pops the next read. An exhausted queue reads "".
    pub fn queued(reads: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            by_mode: HashMap::new(),
            queue: Some(reads),
            failing: Vec::new(),
            calls: None,
            sizes: None,
            delay: Duration::ZERO,
        }
    }

    pub fn failing_modes(mut self, modes: &[u8]) -> Self {
        self.failing = modes.to_vec();
        self
    }

    pub fn recording(mut self, calls: Arc<Mutex<Vec<u8>>>) -> Self {
        self.calls = Some(calls);
        self
    }

    /// Records the dimensions of every image handed to OCR.
    pub fn recording_sizes(mut self, sizes: Arc<Mutex<Vec<(u32, u32)>>>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// Makes every call take at least `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl TextRecognizer for ScriptedOcr {
    fn extract_text(&self, img: &GrayImage, mode: PageSegMode) -> Result<String> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        if let Some(sizes) = &self.sizes {
            sizes.lock().unwrap().push(img.dimensions());
        }
        if let Some(calls) = &self.calls {
            calls.lock().unwrap().push(mode.0);
        }
        if self.failing.contains(&mode.0) {
            return Err(anyhow!("scripted failure for {}", mode));
        }
        if let Some(queue) = &self.queue {
            let mut queue = queue.lock().unwrap();
            return Ok(if queue.is_empty() { String::new() } else { queue.remove(0) });
        }
        Ok(self.by_mode.get(&mode.0).cloned().unwrap_or_default())
    }
}

/// A reader over a blank 2560x1440 screen.
pub fn reader_with(ocr: ScriptedOcr) -> ScreenReader {
    reader_sized(ocr, 2560, 1440)
}

/// A reader over a blank screen of the given size.
pub fn reader_sized(ocr: ScriptedOcr, width: u32, height: u32) -> ScreenReader {
    let frame = ImageBuffer::from_pixel(width, height, Rgba([30, 30, 30, 255]));
    ScreenReader::new(Box::new(StaticScreen(frame)), Box::new(ocr), None)
}
