use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::logging::LogFormat;
use crate::scheduler::{DEFAULT_RECENCY_CAPACITY, DEFAULT_SCORE_MULTIPLIER};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub scheduler: SchedulerConfig,
    pub session: SessionConfig,
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Factor applied to the score on a correct answer, divisor on a wrong one.
    pub score_multiplier: f64,
    /// How many recently shown words a session avoids repeating.
    pub recency_capacity: usize,
    /// Size of the priority-ordered window the next word is picked from.
    pub candidate_limit: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            score_multiplier: DEFAULT_SCORE_MULTIPLIER,
            recency_capacity: DEFAULT_RECENCY_CAPACITY,
            candidate_limit: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub cleanup_cron: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 3600,
            cleanup_cron: "0 */10 * * * *".to_string(),
        }
    }
}

impl SessionConfig {
    /// Idle limit for live sessions. `None` when sessions never expire.
    pub fn idle_timeout(&self) -> Option<chrono::Duration> {
        if self.idle_timeout_secs == 0 {
            return None;
        }
        chrono::Duration::from_std(std::time::Duration::from_secs(self.idle_timeout_secs)).ok()
    }
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let scheduler_defaults = SchedulerConfig::default();
        let session_defaults = SessionConfig::default();

        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            log_format: env_or_parse("LOG_FORMAT", LogFormat::Pretty),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            cors_origin: env_or("CORS_ORIGIN", "*"),
            scheduler: SchedulerConfig {
                score_multiplier: score_multiplier_or_default(env_or_parse(
                    "SCORE_MULTIPLIER",
                    scheduler_defaults.score_multiplier,
                )),
                recency_capacity: env_or_parse(
                    "RECENCY_CAPACITY",
                    scheduler_defaults.recency_capacity,
                ),
                candidate_limit: env_or_parse(
                    "CANDIDATE_LIMIT",
                    scheduler_defaults.candidate_limit,
                )
                .max(1),
            },
            session: SessionConfig {
                idle_timeout_secs: env_or_parse(
                    "SESSION_IDLE_TIMEOUT_SECS",
                    session_defaults.idle_timeout_secs,
                ),
                cleanup_cron: env_or("SESSION_CLEANUP_CRON", &session_defaults.cleanup_cron),
            },
            worker: WorkerConfig {
                enabled: env_or_bool("WORKERS_ENABLED", true),
            },
        }
    }
}

/// Multipliers at or below 1 would invert reinforcement and decay.
fn score_multiplier_or_default(value: f64) -> f64 {
    if value.is_finite() && value > 1.0 {
        value
    } else {
        tracing::warn!(
            value,
            "SCORE_MULTIPLIER must be a finite number greater than 1, using default"
        );
        DEFAULT_SCORE_MULTIPLIER
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
