//! Resolving noisy OCR reads to reference table keys.

pub mod resolver;
pub mod similarity;

pub use resolver::best_match;
