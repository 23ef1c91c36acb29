//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub maps: MapsConfig,

    #[serde(default)]
    pub tasks: TasksConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Gemini language model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Maps directions configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Routing API key. Without it only the map URL is produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_maps_base_url")]
    pub base_url: String,

    #[serde(default = "default_travel_mode")]
    pub travel_mode: String,

    /// Directions JSON API endpoint.
    #[serde(default = "default_directions_url")]
    pub directions_url: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_maps_base_url(),
            travel_mode: default_travel_mode(),
            directions_url: default_directions_url(),
        }
    }
}

fn default_maps_base_url() -> String {
    "https://www.google.com/maps/dir/".to_string()
}

fn default_travel_mode() -> String {
    "driving".to_string()
}

fn default_directions_url() -> String {
    "https://maps.googleapis.com/maps/api/directions/json".to_string()
}

/// Task service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default = "default_tasks_base_url")]
    pub base_url: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            base_url: default_tasks_base_url(),
        }
    }
}

fn default_tasks_base_url() -> String {
    "https://tasks.googleapis.com/tasks/v1".to_string()
}

/// Calendar service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_base_url")]
    pub base_url: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: default_calendar_base_url(),
        }
    }
}

fn default_calendar_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

/// OAuth identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Long-lived grant exchanged for access tokens on sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            refresh_token: None,
            token_url: default_token_url(),
            userinfo_url: default_userinfo_url(),
        }
    }
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v2/userinfo".to_string()
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Defaults to `~/.highlighter` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_limit: default_history_limit(),
        }
    }
}

impl StorageConfig {
    /// The configured data directory, or `~/.highlighter`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".highlighter")
        })
    }
}

fn default_history_limit() -> usize {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit console logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Also write daily-rotated log files under `<data_dir>/logs`.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
