use serde::Deserialize;

use crate::tracking::geo::{self, Coordinate};
use crate::types::track::{LocationSample, TrackSnapshot};

/// Thresholds for the sample acceptance gates. Overridable per track at
/// start time; defaults match a recreational runner on a phone GPS.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub max_accuracy_m: f64,
    pub max_speed_mps: f64,
    pub min_distance_m: f64,
    pub min_interval_ms: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: 50.0,
            max_speed_mps: 15.0,
            min_distance_m: 2.0,
            min_interval_ms: 1000,
        }
    }
}

/// Why a sample was dropped. Not an error: rejected samples leave the
/// track state untouched and the caller gets an explicit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("accuracy above threshold")]
    Accuracy,
    #[error("implied speed above plausible maximum")]
    ImpliedSpeed,
    #[error("movement below minimum distance")]
    Movement,
    #[error("update interval below minimum")]
    Interval,
}

impl Rejected {
    pub fn as_str(self) -> &'static str {
        match self {
            Rejected::Accuracy => "accuracy",
            Rejected::ImpliedSpeed => "implied_speed",
            Rejected::Movement => "movement",
            Rejected::Interval => "interval",
        }
    }
}

/// Mutable state of one in-progress track: accepted samples, cumulative
/// distance and per-sample speeds. Single owner, one per recording session.
#[derive(Debug, Default)]
pub struct TrackState {
    pub samples: Vec<LocationSample>,
    pub speeds_kmh: Vec<f64>,
    pub cumulative_m: f64,
    pub last: Option<LocationSample>,
    pub started_at_ms: Option<i64>,
}

/// Consumes location samples, filters implausible ones and accumulates
/// distance. All gates run before any state mutation.
#[derive(Debug)]
pub struct TrackStream {
    config: FilterConfig,
    state: TrackState,
}

impl TrackStream {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            state: TrackState::default(),
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn into_state(self) -> TrackState {
        self.state
    }

    pub fn cumulative_m(&self) -> f64 {
        self.state.cumulative_m
    }

    pub fn elapsed_ms(&self) -> i64 {
        match (self.state.started_at_ms, self.state.last.as_ref()) {
            (Some(start), Some(last)) => last.timestamp_ms - start,
            _ => 0,
        }
    }

    /// Runs the acceptance gates in order (accuracy, implied speed, minimum
    /// movement, rate throttle) and accumulates the sample on success.
    pub fn accept(&mut self, sample: &LocationSample) -> Result<TrackSnapshot, Rejected> {
        if sample.accuracy_m > self.config.max_accuracy_m {
            return Err(Rejected::Accuracy);
        }

        if let Some(prev) = &self.state.last {
            let step_m = geo::distance_m(
                Coordinate::new(prev.lat, prev.lon),
                Coordinate::new(sample.lat, sample.lon),
            );
            let dt_ms = sample.timestamp_ms - prev.timestamp_ms;

            // dt of zero makes the implied speed infinite, which this gate
            // drops along with genuine GPS jumps.
            if dt_ms >= 0 {
                let implied_mps = step_m / (dt_ms as f64 / 1000.0);
                if implied_mps > self.config.max_speed_mps {
                    return Err(Rejected::ImpliedSpeed);
                }
            }

            if step_m < self.config.min_distance_m {
                return Err(Rejected::Movement);
            }

            if dt_ms < self.config.min_interval_ms {
                return Err(Rejected::Interval);
            }

            self.state.cumulative_m += step_m;
        } else {
            self.state.started_at_ms = Some(sample.timestamp_ms);
        }

        let speed_kmh = sample.speed_mps.map(|mps| mps * 3.6);
        self.state.speeds_kmh.push(speed_kmh.unwrap_or(0.0));
        self.state.samples.push(sample.clone());
        self.state.last = Some(sample.clone());

        Ok(TrackSnapshot {
            distance_m: self.state.cumulative_m,
            elapsed_ms: self.elapsed_ms(),
            speed_kmh,
            pace_min_per_km: speed_kmh.and_then(pace_from_speed),
        })
    }
}

/// Minutes per kilometer at the given speed. Absent when stationary,
/// instead of the 0.0 sentinel this cannot be told apart from.
pub fn pace_from_speed(speed_kmh: f64) -> Option<f64> {
    if speed_kmh > 0.0 {
        Some(60.0 / speed_kmh)
    } else {
        None
    }
}
