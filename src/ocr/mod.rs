pub mod engine;
pub mod extract;
pub mod preprocess;
pub mod setup;

pub use engine::{PageSegMode, Tesseract, TextRecognizer};
pub use extract::{canonicalize, find_round_label, is_augment_round_label, strip_legend_marker};
pub use setup::{ensure_tesseract, TesseractPaths};
