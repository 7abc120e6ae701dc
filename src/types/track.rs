use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One GPS fix as delivered by the location provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSample {
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: Option<f64>,
    pub accuracy_m: f64,
    pub speed_mps: Option<f64>,
    pub timestamp_ms: i64,
}

/// Live view of an in-progress track after one accepted sample.
/// Pace is absent while stationary or when the provider reported no speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub distance_m: f64,
    pub elapsed_ms: i64,
    pub speed_kmh: Option<f64>,
    pub pace_min_per_km: Option<f64>,
}

/// Completed kilometer of a track. `partial` marks the sub-kilometer
/// remainder emitted at stop time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    pub index: u32,
    pub cumulative_m: f64,
    pub duration_ms: i64,
    pub pace_min_per_km: f64,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: Option<f64>,
    pub timestamp_ms: i64,
}

impl PathPoint {
    pub fn from_sample(sample: &LocationSample) -> Self {
        Self {
            lat: sample.lat,
            lon: sample.lon,
            altitude_m: sample.altitude_m,
            timestamp_ms: sample.timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    pub gain_m: f64,
    pub loss_m: f64,
    pub max_m: Option<f64>,
    pub min_m: Option<f64>,
}

/// Finalized result of one completed track. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceRecord {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub distance_m: f64,
    pub avg_speed_kmh: f64,
    pub max_speed_kmh: Option<f64>,
    pub avg_pace_min_per_km: Option<f64>,
    pub best_pace_min_per_km: Option<f64>,
    pub elevation: ElevationStats,
    pub calories_kcal: f64,
    pub path: Vec<PathPoint>,
    pub splits: Vec<Split>,
    pub notes: Option<String>,
}

/// History listing row: everything except the full path and splits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceListEntry {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub distance_m: f64,
    pub avg_speed_kmh: f64,
    pub avg_pace_min_per_km: Option<f64>,
    pub calories_kcal: f64,
    pub split_count: usize,
}

impl RaceListEntry {
    pub fn from_record(record: &RaceRecord) -> Self {
        Self {
            id: record.id,
            started_at: record.started_at,
            ended_at: record.ended_at,
            duration_ms: record.duration_ms,
            distance_m: record.distance_m,
            avg_speed_kmh: record.avg_speed_kmh,
            avg_pace_min_per_km: record.avg_pace_min_per_km,
            calories_kcal: record.calories_kcal,
            split_count: record.splits.len(),
        }
    }
}
