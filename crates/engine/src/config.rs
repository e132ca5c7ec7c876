//! Engine configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVER_HOST` | `0.0.0.0` |
//! | `SERVER_PORT` / `PORT` | `3000` |
//! | `WARBAND_STORE` | `memory` (or `sqlite`) |
//! | `WARBAND_SQLITE_PATH` | `warband.db` |
//! | `WARBAND_TX_MAX_ATTEMPTS` | `5` |
//! | `WARBAND_RECENT_GAMES_HOURS` | `24` |
//! | `CORS_ALLOWED_ORIGINS` | unset (permissive) |

use chrono::Duration;
use std::str::FromStr;

use crate::use_cases::session::DEFAULT_RECENT_WINDOW_HOURS;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SQLITE_PATH: &str = "warband.db";
const DEFAULT_TX_MAX_ATTEMPTS: u32 = 5;

/// Where documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store: StoreBackend,
    pub tx_max_attempts: u32,
    pub recent_games_window: Duration,
    /// Comma-separated origins, or `*`. Unset means permissive CORS.
    pub cors_allowed_origins: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_host = get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let server_port = parse_or(
            "SERVER_PORT",
            get("SERVER_PORT").or_else(|| get("PORT")),
            DEFAULT_PORT,
        );

        let store = match get("WARBAND_STORE").map(|v| v.to_ascii_lowercase()).as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite {
                path: get("WARBAND_SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            },
            Some(other) => {
                tracing::warn!(
                    value = other,
                    "Unknown WARBAND_STORE, falling back to in-memory store"
                );
                StoreBackend::Memory
            }
        };

        let tx_max_attempts = parse_or(
            "WARBAND_TX_MAX_ATTEMPTS",
            get("WARBAND_TX_MAX_ATTEMPTS"),
            DEFAULT_TX_MAX_ATTEMPTS,
        )
        .max(1);

        let window_hours = parse_or(
            "WARBAND_RECENT_GAMES_HOURS",
            get("WARBAND_RECENT_GAMES_HOURS"),
            DEFAULT_RECENT_WINDOW_HOURS,
        );

        Self {
            server_host,
            server_port,
            store,
            tx_max_attempts,
            recent_games_window: Duration::hours(window_hours),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "Unparseable configuration value, using default");
            default
        }
    }
}
