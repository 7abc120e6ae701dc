use serde::{Deserialize, Serialize};

use crate::tracking::stream::pace_from_speed;
use crate::types::track::ElevationStats;

/// MET step function keyed by average speed. Band edges follow the running
/// rows of the Compendium of Physical Activities; they are a heuristic table,
/// not a physical law, so callers can substitute their own bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetTable {
    /// (upper speed bound in km/h, MET), ascending; the last band's MET
    /// applies above the final bound.
    pub bands: Vec<(f64, f64)>,
    pub top_met: f64,
}

impl Default for MetTable {
    fn default() -> Self {
        Self {
            bands: vec![
                (6.0, 6.0),
                (8.0, 8.3),
                (9.8, 9.8),
                (11.0, 11.0),
                (12.8, 12.8),
            ],
            top_met: 14.5,
        }
    }
}

impl MetTable {
    pub fn met_for_speed(&self, speed_kmh: f64) -> f64 {
        for &(upper_kmh, met) in &self.bands {
            if speed_kmh < upper_kmh {
                return met;
            }
        }
        self.top_met
    }
}

/// Derived race totals. Pure output of [`summarize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub avg_speed_kmh: f64,
    pub avg_pace_min_per_km: Option<f64>,
    pub elevation: ElevationStats,
    pub calories_kcal: f64,
}

/// Computes average speed/pace, elevation gain/loss and estimated calories
/// for a finished track. Pure function: identical inputs give identical
/// outputs.
///
/// Calories use a MET model (`met × weight × hours`) plus an elevation bonus
/// of `gain/10 × weight × 0.1`. Altitude samples are used as-is; GPS altitude
/// noise is not smoothed.
pub fn summarize(
    distance_m: f64,
    duration_ms: i64,
    elevation_samples: &[f64],
    weight_kg: f64,
    met_table: &MetTable,
) -> Summary {
    let duration_h = duration_ms as f64 / 3_600_000.0;
    let avg_speed_kmh = if duration_ms > 0 {
        (distance_m / 1000.0) / duration_h
    } else {
        0.0
    };

    let elevation = elevation_stats(elevation_samples);

    let met = met_table.met_for_speed(avg_speed_kmh);
    let calories_kcal =
        met * weight_kg * duration_h.max(0.0) + (elevation.gain_m / 10.0) * weight_kg * 0.1;

    Summary {
        avg_speed_kmh,
        avg_pace_min_per_km: pace_from_speed(avg_speed_kmh),
        elevation,
        calories_kcal,
    }
}

fn elevation_stats(samples: &[f64]) -> ElevationStats {
    let mut gain_m = 0.0;
    let mut loss_m = 0.0;

    for pair in samples.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_m += delta;
        } else {
            loss_m += -delta;
        }
    }

    ElevationStats {
        gain_m,
        loss_m,
        max_m: samples.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        }),
        min_m: samples.iter().copied().fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.min(v)))
        }),
    }
}
