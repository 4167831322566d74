//! Reading an augment name under a card and finding its statistics.

use super::reader::ScreenReader;
use crate::capture::{translate_distance, CaptureRect, ScreenResolution};
use crate::data::{AugmentStats, RankTables};
use crate::matching::best_match;
use crate::ocr::{canonicalize, PageSegMode};

/// Offset from the card anchor to the top-left of the name strip
/// (reference pixels).
const NAME_PAD_X: u32 = 300;
const NAME_PAD_Y: u32 = 30;

/// Size of the name strip (reference pixels).
const NAME_REGION_HEIGHT: u32 = 70;
const NAME_REGION_WIDTH: u32 = 600;

#[derive(Clone, Debug, PartialEq)]
pub struct AugmentMatch {
    pub name: String,
    pub stats: AugmentStats,
    pub score: u8,
}

/// Searches the three tier tables of a rank for `text`.
///
/// An exact key hit in any slot wins immediately with score 100. Otherwise
/// the nearest key across all slots is kept, earlier slots winning ties.
pub fn resolve_in_tables(tables: &RankTables, text: &str) -> Option<AugmentMatch> {
    let mut best: Option<AugmentMatch> = None;
    let mut best_score = 0;

    for (slot, table) in tables.in_order() {
        if let Some((name, stats)) = table.get_key_value(text) {
            crate::log(&format!("Exact match {:?} in tier {}", name, slot));
            return Some(AugmentMatch {
                name: name.clone(),
                stats: *stats,
                score: 100,
            });
        }

        let candidate = best_match(table, text);
        if candidate.score > best_score {
            if let Some(key) = candidate.key {
                if let Some(stats) = table.get(key) {
                    best_score = candidate.score;
                    best = Some(AugmentMatch {
                        name: key.to_string(),
                        stats: *stats,
                        score: candidate.score,
                    });
                }
            }
        }
    }

    best
}

/// Reads the augment name centered on `(x, y)` and resolves it against the
/// rank's tables. OCR failures read as empty text.
pub fn lookup(
    reader: &ScreenReader,
    tables: &RankTables,
    x: i32,
    y: i32,
    resolution: ScreenResolution,
) -> Option<AugmentMatch> {
    let pad_x = translate_distance(NAME_PAD_X, resolution) as i32;
    let pad_y = translate_distance(NAME_PAD_Y, resolution) as i32;
    let rect = CaptureRect::scaled(
        x - pad_x,
        y - pad_y,
        NAME_REGION_HEIGHT,
        NAME_REGION_WIDTH,
        resolution,
    );

    let raw = match reader
        .capture(&rect, &format!("{}.png", x))
        .and_then(|img| reader.recognize(&img, PageSegMode::SINGLE_BLOCK))
    {
        Ok(text) => text,
        Err(e) => {
            crate::log(&format!("Lookup at x={}: {}", x, e));
            String::new()
        }
    };

    let text = canonicalize(&raw);
    let found = resolve_in_tables(tables, &text);

    match &found {
        Some(m) => crate::log(&format!(
            "Read {:?} at x={} -> {:?} (score {})",
            text, x, m.name, m.score
        )),
        None => crate::log(&format!("Read {:?} at x={} -> no match", text, x)),
    }

    found
}
