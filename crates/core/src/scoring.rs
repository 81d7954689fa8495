//! Scoring module - fixed line clear table
//!
//! Points depend only on how many rows a single lock cleared. There is no
//! level multiplier, no combo and no drop bonus.

use crate::types::LINE_SCORES;

/// Points awarded for clearing `lines` rows with one lock
///
/// 0 → 0, 1 → 100, 2 → 300, 3 → 500, 4 or more → 800.
pub fn score_for(lines: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx]
}

/// Add a clear to a running total without overflowing
pub fn add_score(total: u32, lines: u32) -> u32 {
    total.saturating_add(score_for(lines))
}
