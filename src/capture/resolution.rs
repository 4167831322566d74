//! Resolution normalization.
//!
//! All pixel constants in the overlay were measured on a 2560x1440 screen.
//! These helpers map them onto the user's actual screen size.

use serde::{Deserialize, Serialize};

/// A screen size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenResolution {
    pub width: u32,
    pub height: u32,
}

impl ScreenResolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for ScreenResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resolution the reference constants were calibrated against.
pub const REFERENCE_RESOLUTION: ScreenResolution = ScreenResolution::new(2560, 1440);

/// Scales a reference distance using the smaller of the two axis ratios,
/// so that aspect ratio is preserved on non-16:9 screens.
pub fn translate_distance(reference_distance: u32, live: ScreenResolution) -> u32 {
    let width_scale = live.width as f64 / REFERENCE_RESOLUTION.width as f64;
    let height_scale = live.height as f64 / REFERENCE_RESOLUTION.height as f64;
    let scale = width_scale.min(height_scale);

    (reference_distance as f64 * scale).floor() as u32
}

/// Scales a reference point, each axis independently.
///
/// Only for point placement. Sizes and paddings go through
/// [`translate_distance`].
pub fn translate_coordinates(
    reference_x: u32,
    reference_y: u32,
    live: ScreenResolution,
) -> (u32, u32) {
    let new_x = reference_x as f64 * live.width as f64 / REFERENCE_RESOLUTION.width as f64;
    let new_y = reference_y as f64 * live.height as f64 / REFERENCE_RESOLUTION.height as f64;

    (new_x.floor() as u32, new_y.floor() as u32)
}
