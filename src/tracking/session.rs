use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::tracking::split::SplitTracker;
use crate::tracking::stream::{FilterConfig, Rejected, TrackStream};
use crate::tracking::summary::{self, MetTable};
use crate::types::track::{LocationSample, PathPoint, RaceRecord, Split, TrackSnapshot};

/// Result of one accepted location update: the live snapshot plus any splits
/// completed by it.
#[derive(Debug)]
pub struct TrackUpdate {
    pub snapshot: TrackSnapshot,
    pub splits: Vec<Split>,
}

/// One recording session: the sample stream, the split tracker and the split
/// log, alive from track start until the terminal `stop`.
#[derive(Debug)]
pub struct TrackSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    weight_kg: f64,
    stream: TrackStream,
    split_tracker: SplitTracker,
    split_log: Vec<Split>,
}

impl TrackSession {
    pub fn new(id: Uuid, weight_kg: f64, filter: FilterConfig) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            weight_kg,
            stream: TrackStream::new(filter),
            split_tracker: SplitTracker::default(),
            split_log: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Feeds one sample through the stream gates and, on acceptance, the
    /// split tracker. Rejected samples change nothing.
    pub fn accept(&mut self, sample: &LocationSample) -> Result<TrackUpdate, Rejected> {
        let snapshot = self.stream.accept(sample)?;
        let splits = self
            .split_tracker
            .observe(snapshot.distance_m, snapshot.elapsed_ms);
        self.split_log.extend(splits.iter().cloned());
        Ok(TrackUpdate { snapshot, splits })
    }

    /// Terminal transition: closes out a final partial split, derives the
    /// summary and builds the immutable race record. Consumes the session,
    /// so no further samples can be accepted.
    pub fn stop(mut self, notes: Option<String>) -> RaceRecord {
        let distance_m = self.stream.cumulative_m();
        let duration_ms = self.stream.elapsed_ms();

        if let Some(partial) = self.split_tracker.finish(distance_m, duration_ms) {
            self.split_log.push(partial);
        }

        let state = self.stream.into_state();
        let elevations: Vec<f64> = state.samples.iter().filter_map(|s| s.altitude_m).collect();

        let summary = summary::summarize(
            distance_m,
            duration_ms,
            &elevations,
            self.weight_kg,
            &MetTable::default(),
        );

        let max_speed_kmh = state
            .speeds_kmh
            .iter()
            .copied()
            .filter(|&v| v > 0.0)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

        let best_pace_min_per_km = self
            .split_log
            .iter()
            .filter(|s| !s.partial)
            .map(|s| s.pace_min_per_km)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))));

        RaceRecord {
            id: self.id,
            started_at: self.started_at,
            ended_at: Utc::now(),
            duration_ms,
            distance_m,
            avg_speed_kmh: summary.avg_speed_kmh,
            max_speed_kmh,
            avg_pace_min_per_km: summary.avg_pace_min_per_km,
            best_pace_min_per_km,
            elevation: summary.elevation,
            calories_kcal: summary.calories_kcal,
            path: state.samples.iter().map(PathPoint::from_sample).collect(),
            splits: self.split_log,
            notes,
        }
    }
}
