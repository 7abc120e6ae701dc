use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use crate::config::Config;
use crate::error::TrackError;
use crate::tracking::session::{TrackSession, TrackUpdate};
use crate::tracking::stream::{FilterConfig, Rejected};
use crate::types::track::{LocationSample, RaceRecord};

#[derive(Clone)]
pub struct AppState {
    config: Config,
    sessions: Arc<DashMap<Uuid, LiveSession>>,
    races: Arc<DashMap<Uuid, RaceRecord>>,
}

struct LiveSession {
    session: TrackSession,
    updated_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: Arc::new(DashMap::new()),
            races: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn start_session(&self, weight_kg: f64, filter: Option<FilterConfig>) -> Uuid {
        let id = Uuid::new_v4();
        let filter = filter.unwrap_or(self.config.filter);
        self.sessions.insert(
            id,
            LiveSession {
                session: TrackSession::new(id, weight_kg, filter),
                updated_at: Instant::now(),
            },
        );
        id
    }

    /// Feeds one sample to the session. The dashmap entry lock serializes
    /// concurrent updates for the same track.
    pub fn accept_sample(
        &self,
        id: Uuid,
        sample: &LocationSample,
    ) -> Result<Result<TrackUpdate, Rejected>, TrackError> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or(TrackError::SessionNotFound(id))?;
        entry.updated_at = Instant::now();
        Ok(entry.session.accept(sample))
    }

    /// Terminal transition: removes the live session, finalizes it and files
    /// the race record. Updates arriving afterwards see SessionNotFound.
    pub fn stop_session(&self, id: Uuid, notes: Option<String>) -> Result<RaceRecord, TrackError> {
        let (_, live) = self
            .sessions
            .remove(&id)
            .ok_or(TrackError::SessionNotFound(id))?;
        let record = live.session.stop(notes);
        self.races.insert(record.id, record.clone());
        Ok(record)
    }

    pub fn race(&self, id: Uuid) -> Result<RaceRecord, TrackError> {
        self.races
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(TrackError::RaceNotFound(id))
    }

    pub fn races(&self) -> Vec<RaceRecord> {
        let mut records: Vec<RaceRecord> = self.races.iter().map(|e| e.value().clone()).collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.started_at));
        records
    }

    /// Drops live sessions with no update for `ttl`. Finished races are kept.
    pub fn evict_idle(&self, ttl: Duration) {
        let now = Instant::now();
        self.sessions
            .retain(|_, live| now.duration_since(live.updated_at) < ttl);
        tracing::info!(
            "Session eviction complete. Active sessions: {}",
            self.sessions.len()
        );
    }
}
