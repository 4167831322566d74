//! Screen capture for the overlay.
//!
//! This module provides:
//! - Resolution normalization against the 2560x1440 reference screen
//! - Full-screen capture of the primary monitor (`PrimaryMonitor`)
//! - Region capture with OCR preprocessing (`capture_region`)

pub mod region;
pub mod resolution;
pub mod screen;

pub use region::{capture_region, CaptureRect};
pub use resolution::{translate_distance, ScreenResolution};
pub use screen::{PrimaryMonitor, ScreenSource};
