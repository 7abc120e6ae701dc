use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::tracking::stream::FilterConfig;
use crate::types::track::{LocationSample, RaceRecord, Split, TrackSnapshot};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tracks", post(start_track))
        .route("/api/tracks/:id/locations", post(post_location))
        .route("/api/tracks/:id/stop", post(stop_track))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StartTrackRequest {
    #[serde(default = "default_weight_kg")]
    weight_kg: f64,
    #[serde(default)]
    filter: Option<FilterConfig>,
}

fn default_weight_kg() -> f64 {
    70.0
}

#[derive(Serialize, Deserialize)]
struct StartTrackResponse {
    track_id: Uuid,
}

async fn start_track(
    State(state): State<AppState>,
    Json(request): Json<StartTrackRequest>,
) -> Result<Json<StartTrackResponse>, AppError> {
    if !(request.weight_kg > 0.0 && request.weight_kg < 500.0) {
        return Err(AppError::BadRequest(format!(
            "Invalid weight: {} kg",
            request.weight_kg
        )));
    }

    let track_id = state.start_session(request.weight_kg, request.filter);
    tracing::info!("Started track {}", track_id);

    Ok(Json(StartTrackResponse { track_id }))
}

#[derive(Serialize, Deserialize)]
struct LocationResponse {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<TrackSnapshot>,
    splits: Vec<Split>,
}

fn validate_sample(sample: &LocationSample) -> Result<(), AppError> {
    if !(-90.0..=90.0).contains(&sample.lat) || !(-180.0..=180.0).contains(&sample.lon) {
        return Err(AppError::BadRequest(format!(
            "Coordinates out of range: {}, {}",
            sample.lat, sample.lon
        )));
    }
    if !sample.accuracy_m.is_finite() || sample.accuracy_m < 0.0 {
        return Err(AppError::BadRequest(format!(
            "Invalid accuracy: {}",
            sample.accuracy_m
        )));
    }
    Ok(())
}

async fn post_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(sample): Json<LocationSample>,
) -> Result<Json<LocationResponse>, AppError> {
    validate_sample(&sample)?;

    let response = match state.accept_sample(id, &sample)? {
        Ok(update) => {
            for split in &update.splits {
                tracing::info!(
                    "Track {} completed km {} in {:.2} min",
                    id,
                    split.index,
                    split.pace_min_per_km
                );
            }
            LocationResponse {
                accepted: true,
                rejection: None,
                snapshot: Some(update.snapshot),
                splits: update.splits,
            }
        }
        Err(rejected) => {
            tracing::debug!("Track {} dropped sample: {}", id, rejected);
            LocationResponse {
                accepted: false,
                rejection: Some(rejected.as_str()),
                snapshot: None,
                splits: Vec::new(),
            }
        }
    };

    Ok(Json(response))
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct StopTrackRequest {
    #[serde(default)]
    notes: Option<String>,
}

async fn stop_track(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<StopTrackRequest>>,
) -> Result<Json<RaceRecord>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let record = state.stop_session(id, request.notes)?;

    tracing::info!(
        "Stopped track {} ({:.2} km, {} splits, {:.0} kcal)",
        id,
        record.distance_m / 1000.0,
        record.splits.len(),
        record.calories_kcal
    );

    Ok(Json(record))
}
