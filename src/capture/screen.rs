//! Full-screen capture of the primary monitor.

use anyhow::{anyhow, Result};
use image::RgbaImage;
use xcap::Monitor;

use super::resolution::ScreenResolution;

/// Something that can hand out the current contents of the screen.
pub trait ScreenSource: Send {
    /// Size of the screen in physical pixels.
    fn resolution(&self) -> Result<ScreenResolution>;

    /// Captures the whole screen as an RGBA image.
    fn capture(&self) -> Result<RgbaImage>;
}

/// Captures the primary monitor through xcap.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryMonitor;

impl PrimaryMonitor {
    fn find() -> Result<Monitor> {
        let monitors = Monitor::all()?;
        if monitors.is_empty() {
            return Err(anyhow!("No monitors detected"));
        }

        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary()? {
                return Ok(monitor);
            }
            if fallback.is_none() {
                fallback = Some(monitor);
            }
        }

        fallback.ok_or_else(|| anyhow!("No monitors detected"))
    }
}

impl ScreenSource for PrimaryMonitor {
    fn resolution(&self) -> Result<ScreenResolution> {
        let monitor = Self::find()?;
        Ok(ScreenResolution::new(monitor.width()?, monitor.height()?))
    }

    fn capture(&self) -> Result<RgbaImage> {
        let monitor = Self::find()?;
        Ok(monitor.capture_image()?)
    }
}
