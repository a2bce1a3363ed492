//! Scoring module - classic line-clear scoring and level progression
//!
//! - A clear of `n` lines is worth `LINE_SCORES[n] * (level + 1)`.
//! - Every `LINES_PER_LEVEL` cleared lines advance the level by one.
//! - Gravity speeds up linearly with the level down to a floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Outcome of recording one line clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for the clear.
    pub points: u32,
    /// Levels gained (usually 0 or 1).
    pub levels_gained: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared (1-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    match LINE_SCORES.get(lines as usize) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Get drop interval for a level (in milliseconds)
///
/// Linear ramp from `BASE_DROP_MS`, clamped at `DROP_INTERVAL_MIN_MS`.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_INTERVAL_STEP_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

/// Score, level and gravity of one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u32,
    /// Lines cleared toward the next level, always below `LINES_PER_LEVEL`.
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: BASE_DROP_MS,
        }
    }

    /// Apply a clear of `lines` rows
    ///
    /// Points use the level *before* any level-up caused by this clear.
    pub fn record_clear(&mut self, lines: u32) -> ScoreResult {
        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += lines;

        let mut levels_gained = 0;
        while self.lines >= LINES_PER_LEVEL {
            self.level += 1;
            self.lines -= LINES_PER_LEVEL;
            self.drop_interval_ms = get_drop_interval_ms(self.level);
            levels_gained += 1;
        }

        ScoreResult {
            points,
            levels_gained,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        // Level 0
        assert_eq!(calculate_line_score(1, 0), 40);
        assert_eq!(calculate_line_score(2, 0), 100);
        assert_eq!(calculate_line_score(3, 0), 300);
        assert_eq!(calculate_line_score(4, 0), 1200);

        // Level 5
        assert_eq!(calculate_line_score(1, 5), 40 * 6);
        assert_eq!(calculate_line_score(4, 5), 1200 * 6);
    }

    #[test]
    fn test_out_of_range_clears_score_nothing() {
        assert_eq!(calculate_line_score(0, 3), 0);
        assert_eq!(calculate_line_score(5, 0), 0);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(0), 1000);
        assert_eq!(get_drop_interval_ms(1), 950);
        assert_eq!(get_drop_interval_ms(10), 500);
        assert_eq!(get_drop_interval_ms(18), 100);
        assert_eq!(get_drop_interval_ms(19), 100);
        assert_eq!(get_drop_interval_ms(500), 100);
    }

    #[test]
    fn test_record_clear_accumulates() {
        let mut progress = Progress::new();
        let result = progress.record_clear(2);
        assert_eq!(result.points, 100);
        assert_eq!(result.levels_gained, 0);
        assert_eq!(progress.score, 100);
        assert_eq!(progress.lines, 2);
        assert_eq!(progress.drop_interval_ms, 1000);
    }

    #[test]
    fn test_level_up_carries_remainder() {
        let mut progress = Progress::new();
        progress.lines = 8;

        let result = progress.record_clear(4);
        // Scored at level 0, then promoted.
        assert_eq!(result.points, 1200);
        assert_eq!(result.levels_gained, 1);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.lines, 2);
        assert_eq!(progress.drop_interval_ms, 950);
    }

    #[test]
    fn test_level_multiplier_applies() {
        let mut progress = Progress {
            level: 3,
            ..Progress::new()
        };
        let result = progress.record_clear(1);
        assert_eq!(result.points, 40 * 4);
    }
}
