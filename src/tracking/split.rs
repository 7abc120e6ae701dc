use crate::types::track::Split;

const SPLIT_LENGTH_M: f64 = 1000.0;

/// Watches the cumulative-distance stream and emits one Split per
/// whole-kilometer boundary crossed.
///
/// When a single update covers more than one boundary (GPS outage then
/// reacquisition) the skipped kilometers are back-filled with proportional
/// splits, with boundary times interpolated linearly by distance between the
/// two observations. Indices stay contiguous from 1 with no gaps.
#[derive(Debug)]
pub struct SplitTracker {
    min_partial_m: f64,
    last_split_count: u32,
    time_of_last_split_ms: i64,
    prev_cumulative_m: f64,
    prev_elapsed_ms: i64,
}

impl SplitTracker {
    pub fn new(min_partial_m: f64) -> Self {
        Self {
            min_partial_m,
            last_split_count: 0,
            time_of_last_split_ms: 0,
            prev_cumulative_m: 0.0,
            prev_elapsed_ms: 0,
        }
    }

    /// Called once per accepted track update. Usually returns zero or one
    /// split; more only when the update crossed several boundaries.
    pub fn observe(&mut self, cumulative_m: f64, elapsed_ms: i64) -> Vec<Split> {
        let current_count = (cumulative_m / SPLIT_LENGTH_M).floor() as u32;
        let mut emitted = Vec::new();

        let span_m = cumulative_m - self.prev_cumulative_m;
        let span_ms = elapsed_ms - self.prev_elapsed_ms;

        for index in (self.last_split_count + 1)..=current_count {
            let boundary_m = f64::from(index) * SPLIT_LENGTH_M;
            let boundary_ms = if span_m > 0.0 {
                let t = (boundary_m - self.prev_cumulative_m) / span_m;
                self.prev_elapsed_ms + (span_ms as f64 * t).round() as i64
            } else {
                elapsed_ms
            };

            let duration_ms = boundary_ms - self.time_of_last_split_ms;
            emitted.push(Split {
                index,
                cumulative_m: boundary_m,
                duration_ms,
                pace_min_per_km: duration_ms as f64 / 60_000.0,
                partial: false,
            });
            self.time_of_last_split_ms = boundary_ms;
        }

        self.last_split_count = current_count;
        self.prev_cumulative_m = cumulative_m;
        self.prev_elapsed_ms = elapsed_ms;

        emitted
    }

    /// Final partial split at stop time, for any remainder past the last
    /// full-kilometer boundary. Pace is scaled to the partial distance.
    pub fn finish(&mut self, cumulative_m: f64, elapsed_ms: i64) -> Option<Split> {
        let remainder_m = cumulative_m - f64::from(self.last_split_count) * SPLIT_LENGTH_M;
        if remainder_m < self.min_partial_m {
            return None;
        }

        let duration_ms = elapsed_ms - self.time_of_last_split_ms;
        let split = Split {
            index: self.last_split_count + 1,
            cumulative_m,
            duration_ms,
            pace_min_per_km: (duration_ms as f64 / 60_000.0) / (remainder_m / SPLIT_LENGTH_M),
            partial: true,
        };
        self.time_of_last_split_ms = elapsed_ms;
        Some(split)
    }
}

impl Default for SplitTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}
