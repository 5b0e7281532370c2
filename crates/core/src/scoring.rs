//! Scoring module - line clear points and level progression
//!
//! Applied once per lock. The point multiplier is the level in effect
//! before the cleared rows are counted; the level is recomputed afterwards.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Outcome of counting one lock's cleared rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub lines: u32,
    pub level: u32,
}

/// Points for clearing `lines` rows at `level`.
///
/// More than four rows cannot come from a single tetromino; they score as four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)].saturating_mul(level)
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Apply one lock's clear to the running totals
pub fn apply_clear(cleared: usize, total_lines: u32, level: u32) -> ScoreResult {
    let points = calculate_line_score(cleared, level);
    let lines = total_lines.saturating_add(cleared as u32);
    ScoreResult {
        points,
        lines,
        level: calculate_level(lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        assert_eq!(calculate_line_score(1, 7), 100 * 7);
        assert_eq!(calculate_line_score(4, 7), 800 * 7);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_score_uses_level_before_update() {
        // 8 lines at level 1, then a tetris crosses into level 2.
        let result = apply_clear(4, 8, 1);
        assert_eq!(result.points, 800);
        assert_eq!(result.lines, 12);
        assert_eq!(result.level, 2);
    }

    #[test]
    fn test_no_clear_changes_nothing() {
        let result = apply_clear(0, 15, 2);
        assert_eq!(result, ScoreResult { points: 0, lines: 15, level: 2 });
    }
}
