//! Where things are on screen, derived from the live resolution.

use crate::capture::resolution::{translate_distance, ScreenResolution};

/// Horizontal offset from screen center to the left edge of the stage
/// indicator region (reference pixels).
const ROUND_ANCHOR_OFFSET: u32 = 300;

/// Vertical offset from the option row up to the rendered text
/// (reference pixels).
const TEXT_OFFSET_Y: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayLayout {
    pub resolution: ScreenResolution,
    /// Top-left of the stage indicator region
    pub round_anchor: (i32, i32),
    /// Horizontal centers of the three augment cards
    pub option_xs: [i32; 3],
    /// Row the augment names are read from
    pub option_y: i32,
    /// Row the statistics are drawn on
    pub text_y: i32,
}

impl OverlayLayout {
    pub fn for_resolution(resolution: ScreenResolution) -> Self {
        let middle_x = (resolution.width / 2) as i32;
        let middle_y = (resolution.height / 2) as i32;

        // Cards sit symmetrically around the center, no further out than
        // the screen's half-height.
        let distance = middle_x.min(middle_y);
        let left = middle_x - distance;
        let distance = left.min(middle_y);

        let round_offset = translate_distance(ROUND_ANCHOR_OFFSET, resolution) as i32;
        let text_offset = translate_distance(TEXT_OFFSET_Y, resolution) as i32;

        Self {
            resolution,
            round_anchor: ((middle_x - round_offset).max(0), 0),
            option_xs: [middle_x - distance, middle_x, middle_x + distance],
            option_y: middle_y,
            text_y: middle_y - text_offset,
        }
    }
}
