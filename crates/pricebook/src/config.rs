use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "pricebook.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub sqlite_path: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Truncation unit for timetables in milliseconds (default: 1,000)
    pub timetable_resolution_ms: i64,
    /// Preload the demo offers on startup (default: false)
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "pricebook.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `TIMETABLE_RESOLUTION_MS` - Timetable truncation unit, must be positive (default: 1,000)
    /// - `SEED_DEMO_DATA` - `true`/`1` to preload demo offers (default: false)
    pub fn from_env() -> Self {
        Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "pricebook.db".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            timetable_resolution_ms: env::var("TIMETABLE_RESOLUTION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms: &i64| *ms > 0)
                .unwrap_or(1_000),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the timetable truncation unit.
    pub fn timetable_resolution(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.timetable_resolution_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
