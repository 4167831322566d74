//! The overlay pipeline: round detection, augment lookup and the display
//! loop that ties them together on a worker thread.

pub mod canvas;
pub mod display;
pub mod layout;
pub mod lookup;
pub mod phase;
pub mod reader;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use canvas::{OverlayLabel, SharedLabels};
pub use runner::{start_overlay, OverlayHandle};
