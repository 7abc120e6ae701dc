use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::types::track::{RaceListEntry, RaceRecord};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/races", get(list_races))
        .route("/api/races/:id", get(get_race))
}

async fn list_races(State(state): State<AppState>) -> Json<Vec<RaceListEntry>> {
    let entries = state
        .races()
        .iter()
        .map(RaceListEntry::from_record)
        .collect();
    Json(entries)
}

async fn get_race(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RaceRecord>, AppError> {
    Ok(Json(state.race(id)?))
}
