//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP port the booking API listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database file holding the appointment table.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    // === Client Configuration ===
    /// Base URL of the booking API the console client calls.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the Aadhar-center directory service.
    #[serde(default = "default_centers_base_url")]
    pub centers_base_url: String,

    /// HTTP client timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    5001
}

fn default_database_path() -> PathBuf {
    PathBuf::from("users_appointment.db")
}

fn default_api_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_centers_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_http_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be nonzero".to_string());
        }

        if self.database_path.as_os_str().is_empty() {
            return Err("DATABASE_PATH must not be empty".to_string());
        }

        url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("API_BASE_URL is not a valid URL: {e}"))?;

        url::Url::parse(&self.centers_base_url)
            .map_err(|e| format!("CENTERS_BASE_URL is not a valid URL: {e}"))?;

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be nonzero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: default_port(),
            database_path: default_database_path(),
            api_base_url: default_api_base_url(),
            centers_base_url: default_centers_base_url(),
            http_timeout_ms: default_http_timeout_ms(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_port(), 5001);
        assert_eq!(default_database_path(), PathBuf::from("users_appointment.db"));
        assert_eq!(default_api_base_url(), "http://localhost:5001");
        assert_eq!(default_http_timeout_ms(), 5_000);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let mut config = test_config();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_database_path() {
        let mut config = test_config();
        config.database_path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let mut config = test_config();
        config.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = test_config();
        config.http_timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
