use std::time::Duration;

use crate::tracking::stream::FilterConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_body_size: usize,
    pub session_ttl: Duration,
    pub filter: FilterConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_body_size_kb = std::env::var("MAX_BODY_SIZE_KB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64);

        let session_ttl_seconds = std::env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600);

        let mut filter = FilterConfig::default();
        if let Some(v) = env_f64("MAX_ACCURACY_M") {
            filter.max_accuracy_m = v;
        }
        if let Some(v) = env_f64("MAX_SPEED_MPS") {
            filter.max_speed_mps = v;
        }
        if let Some(v) = env_f64("MIN_DISTANCE_M") {
            filter.min_distance_m = v;
        }
        if let Some(v) = std::env::var("MIN_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            filter.min_interval_ms = v;
        }

        Self {
            port,
            max_body_size: max_body_size_kb * 1024,
            session_ttl: Duration::from_secs(session_ttl_seconds),
            filter,
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}
