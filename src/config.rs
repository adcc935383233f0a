//! Configuration management for the `WeatherBuddy` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherBuddyError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `WeatherBuddy` application
///
/// Every section falls back to its defaults, so the application runs
/// with no config file at all (serving demo data until a key is set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBuddyConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Without a usable key every request
    /// resolves to the built-in demo dataset.
    pub api_key: Option<String>,
    /// Base URL for the weather endpoints
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Base URL for the geocoding endpoints
    #[serde(default = "default_geo_base_url")]
    pub geo_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Home location name shown when no place is requested
    #[serde(default = "default_home_name")]
    pub home_name: String,
    /// Home location latitude
    #[serde(default = "default_home_latitude")]
    pub home_latitude: f64,
    /// Home location longitude
    #[serde(default = "default_home_longitude")]
    pub home_longitude: f64,
    /// Number of hourly entries in a report
    #[serde(default = "default_hourly_hours")]
    pub hourly_hours: u32,
    /// Number of daily entries in a report
    #[serde(default = "default_daily_days")]
    pub daily_days: u32,
    /// Port for the embedded web server
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_geo_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_cache_ttl() -> u32 {
    30
}

fn default_cache_location() -> String {
    "~/.cache/weatherbuddy".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_home_name() -> String {
    "New York, NY, US".to_string()
}

fn default_home_latitude() -> f64 {
    40.7128
}

fn default_home_longitude() -> f64 {
    -74.0060
}

fn default_hourly_hours() -> u32 {
    10
}

fn default_daily_days() -> u32 {
    5
}

fn default_port() -> u16 {
    3000
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            geo_url: default_geo_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            home_name: default_home_name(),
            home_latitude: default_home_latitude(),
            home_longitude: default_home_longitude(),
            hourly_hours: default_hourly_hours(),
            daily_days: default_daily_days(),
            port: default_port(),
        }
    }
}

impl Default for WeatherBuddyConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl WeatherBuddyConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with WEATHERBUDDY_ prefix
        builder = builder.add_source(
            Environment::with_prefix("WEATHERBUDDY")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherBuddyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherbuddy").join("config.toml"))
    }

    /// A key is usable when it is present, not the sample placeholder,
    /// and long enough to plausibly be a real key.
    #[must_use]
    pub fn has_usable_key(&self) -> bool {
        match &self.weather.api_key {
            Some(key) => key != "your_api_key_here" && key.len() > 10,
            None => false,
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the API key, if one is configured
    pub fn validate_api_key(&self) -> Result<()> {
        // The key is optional: without one the service serves demo data.
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(WeatherBuddyError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() > 100 {
                return Err(WeatherBuddyError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(WeatherBuddyError::config(
                "Weather API timeout cannot exceed 300 seconds"
            ).into());
        }

        if self.weather.max_retries > 10 {
            return Err(WeatherBuddyError::config(
                "Weather API max retries cannot exceed 10"
            ).into());
        }

        if self.cache.ttl_minutes > 1440 {
            return Err(WeatherBuddyError::config(
                "Cache TTL cannot exceed 1440 minutes (1 day)"
            ).into());
        }

        if !(-90.0..=90.0).contains(&self.defaults.home_latitude) {
            return Err(WeatherBuddyError::config(
                "Home latitude must be between -90 and 90 degrees"
            ).into());
        }

        if !(-180.0..=180.0).contains(&self.defaults.home_longitude) {
            return Err(WeatherBuddyError::config(
                "Home longitude must be between -180 and 180 degrees"
            ).into());
        }

        if self.defaults.hourly_hours == 0 || self.defaults.hourly_hours > 48 {
            return Err(WeatherBuddyError::config(
                "Hourly entries must be between 1 and 48"
            ).into());
        }

        if self.defaults.daily_days == 0 || self.defaults.daily_days > 5 {
            return Err(WeatherBuddyError::config(
                "Daily entries must be between 1 and 5 (the forecast endpoint covers 5 days)"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherBuddyError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherBuddyError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        for url in [&self.weather.base_url, &self.weather.geo_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherBuddyError::config(
                    "Weather API base URLs must be valid HTTP or HTTPS URLs"
                ).into());
            }
        }

        Ok(())
    }

    /// Resolve the cache directory, expanding a leading `~`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        let location = &self.cache.location;
        if let Some(rest) = location.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeatherBuddyConfig::default();
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.cache.ttl_minutes, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.daily_days, 5);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_missing_key_is_valid_but_unusable() {
        let config = WeatherBuddyConfig::default();
        assert!(config.validate_api_key().is_ok());
        assert!(!config.has_usable_key());
    }

    #[test]
    fn test_placeholder_key_is_unusable() {
        let mut config = WeatherBuddyConfig::default();
        config.weather.api_key = Some("your_api_key_here".to_string());
        assert!(!config.has_usable_key());

        config.weather.api_key = Some("short".to_string());
        assert!(!config.has_usable_key());

        config.weather.api_key = Some("a_real_looking_key_123".to_string());
        assert!(config.has_usable_key());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherBuddyConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherBuddyConfig::default();
        config.weather.timeout_seconds = 500; // Invalid - too high
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_coordinates() {
        let mut config = WeatherBuddyConfig::default();
        config.defaults.home_latitude = 123.0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("latitude"));
    }

    #[test]
    fn test_config_path_generation() {
        let path = WeatherBuddyConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("weatherbuddy"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_cache_dir_expands_home() {
        let config = WeatherBuddyConfig::default();
        let dir = config.cache_dir();
        assert!(!dir.to_string_lossy().starts_with('~'));
    }
}
