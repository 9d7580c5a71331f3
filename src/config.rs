use crate::components::schedule::models::Prayer;
use crate::error::{config_error, env_error, SyncResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;

/// Default URL of the published prayer-time feed
pub const DEFAULT_FEED_URL: &str =
    "https://markhammasjid.ca/wp-content/scripts/ism-2019-prayer-times.csv";

/// Default timezone label attached to created events
pub const DEFAULT_TIMEZONE: &str = "America/Toronto";

/// Main configuration structure for the sync
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar ID to publish events into
    pub google_calendar_id: String,
    /// URL of the weekly prayer-time CSV feed
    pub feed_url: String,
    /// Timezone label attached to event start/end times
    pub timezone: String,
    /// Path to the OAuth client secrets file
    pub client_secrets_file: String,
    /// Path where the OAuth token is persisted between runs
    pub token_file: String,
    /// Local port the interactive OAuth flow listens on
    pub oauth_listen_port: u16,
    /// Map of prayer names to their event duration in minutes
    pub durations: HashMap<String, i64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> SyncResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // The target calendar has no usable default
        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;
        if google_calendar_id.trim().is_empty() {
            return Err(config_error("GOOGLE_CALENDAR_ID must not be empty"));
        }

        let feed_url = env::var("FEED_URL").unwrap_or_else(|_| String::from(DEFAULT_FEED_URL));
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from(DEFAULT_TIMEZONE));
        if timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(config_error(&format!("Unknown timezone: {}", timezone)));
        }

        let client_secrets_file =
            env::var("CLIENT_SECRETS_FILE").unwrap_or_else(|_| String::from("credentials.json"));
        let token_file = env::var("TOKEN_FILE").unwrap_or_else(|_| String::from("token.json"));

        let oauth_listen_port = env::var("OAUTH_LISTEN_PORT")
            .unwrap_or_else(|_| String::from("8080"))
            .parse::<u16>()
            .map_err(|_| config_error("Invalid OAUTH_LISTEN_PORT format"))?;

        // Initialize default per-prayer durations
        let mut durations = Self::default_durations();

        // Load duration overrides from file if it exists
        if let Ok(content) = fs::read_to_string("config/durations.toml") {
            if let Ok(file_durations) = toml::from_str::<HashMap<String, i64>>(&content) {
                // Merge with defaults
                for (key, value) in file_durations {
                    durations.insert(key, value);
                }
            }
        }

        if let Some((prayer, minutes)) = durations.iter().find(|(_, m)| **m <= 0) {
            return Err(config_error(&format!(
                "Duration for {} must be positive, got {}",
                prayer, minutes
            )));
        }

        Ok(Config {
            google_calendar_id,
            feed_url,
            timezone,
            client_secrets_file,
            token_file,
            oauth_listen_port,
            durations,
        })
    }

    /// Built-in per-prayer durations in minutes
    pub fn default_durations() -> HashMap<String, i64> {
        Prayer::ALL
            .iter()
            .map(|p| (p.summary().to_string(), p.default_duration_min()))
            .collect()
    }

    /// Event duration in minutes for the given prayer
    pub fn duration_min(&self, prayer: Prayer) -> i64 {
        self.durations
            .get(prayer.summary())
            .copied()
            .unwrap_or_else(|| prayer.default_duration_min())
    }
}
