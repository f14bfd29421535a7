//! Configuration for the Echoprint server.
//!
//! All configuration is read from the environment exactly once, at
//! startup, and handed to each component at construction time. Business
//! logic never reads ambient globals, so tests can supply fakes.

use std::time::Duration;

use crate::error::AppError;

/// Default OpenTimestamps calendar aggregator.
const DEFAULT_CALENDAR_URL: &str = "https://a.pool.opentimestamps.org";

/// Upstream calls must complete within this window; a timeout is an
/// upstream failure, not a success.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Record store (PostgREST-style) settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Service-role key, sent as both `apikey` and bearer token.
    pub service_key: String,
    /// Table holding the records.
    pub table: String,
    /// Column upserts resolve conflicts on (`hash` or `permalink`).
    pub conflict_key: String,
}

/// Timestamp calendar settings.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Base URL of the calendar server.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub store: StoreConfig,
    pub calendar: CalendarConfig,
}

impl AppConfig {
    /// Builds the configuration from the environment.
    ///
    /// `STORE_URL` and `STORE_SERVICE_KEY` are required; everything else
    /// has a default.
    pub fn from_env() -> Result<Self, AppError> {
        let require = |name: &str| {
            std::env::var(name)
                .map_err(|_| AppError::Configuration(format!("{name} is not set")))
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            store: StoreConfig {
                base_url: trim_slash(require("STORE_URL")?),
                service_key: require("STORE_SERVICE_KEY")?,
                table: std::env::var("STORE_TABLE").unwrap_or_else(|_| "echoprints".to_string()),
                conflict_key: std::env::var("STORE_CONFLICT_KEY")
                    .unwrap_or_else(|_| "hash".to_string()),
            },
            calendar: CalendarConfig {
                base_url: trim_slash(
                    std::env::var("CALENDAR_URL")
                        .unwrap_or_else(|_| DEFAULT_CALENDAR_URL.to_string()),
                ),
                timeout: UPSTREAM_TIMEOUT,
            },
        })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
