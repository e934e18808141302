use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Default Open-Meteo daily forecast endpoint
pub const DEFAULT_FORECAST_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Timezone identifiers accepted for `default_timezone`
pub const SUPPORTED_TIMEZONES: [&str; 5] = [
    "Africa/Cairo",
    "Asia/Tokyo",
    "America/Los_Angeles",
    "Europe/London",
    "Australia/Sydney",
];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the config was loaded from (not stored in the file)
    #[serde(skip, default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Timezone selected at startup (e.g. "Asia/Tokyo")
    #[serde(default)]
    pub default_timezone: Option<String>,

    /// Forecast service settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Fixed device position, used when the host has no location service
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecast endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of forecast days to request (service default is 7)
    #[serde(default)]
    pub forecast_days: Option<u8>,
}

fn default_endpoint() -> String {
    DEFAULT_FORECAST_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            forecast_days: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationConfig {
    /// Returns the configured (latitude, longitude) pair, if both are set.
    pub fn fixed_position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tenki")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            default_timezone: None,
            forecast: ForecastConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_dir);

        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self {
                config_dir,
                ..Self::default()
            };
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;
        config.config_dir = config_dir;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load()?.into_validated()
    }

    /// Validate an already-loaded config, logging warnings
    pub fn into_validated(self) -> Result<(Self, ValidationResult)> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.endpoint, "forecast.endpoint", &mut result);

        if self.forecast.timeout_secs == 0 {
            result.add_error("forecast.timeout_secs", "Timeout must be greater than 0");
        } else if self.forecast.timeout_secs > 120 {
            result.add_warning(
                "forecast.timeout_secs",
                "Timeout is unusually long (>120 seconds)",
            );
        }

        if let Some(days) = self.forecast.forecast_days {
            if !(1..=16).contains(&days) {
                result.add_error(
                    "forecast.forecast_days",
                    format!("Forecast days must be between 1 and 16, got {}", days),
                );
            }
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                    result.add_error(
                        "location.latitude",
                        format!("Latitude must be between -90 and 90, got {}", lat),
                    );
                }
                if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                    result.add_error(
                        "location.longitude",
                        format!("Longitude must be between -180 and 180, got {}", lon),
                    );
                }
            }
            (None, None) => {}
            _ => {
                result.add_error(
                    "location",
                    "Latitude and longitude must be set together",
                );
            }
        }

        if let Some(tz) = &self.default_timezone {
            if tz.trim().is_empty() {
                result.add_warning("default_timezone", "Empty timezone is ignored");
            } else if !SUPPORTED_TIMEZONES.contains(&tz.trim()) {
                result.add_error(
                    "default_timezone",
                    format!(
                        "Unsupported timezone: {} (expected one of {})",
                        tz,
                        SUPPORTED_TIMEZONES.join(", ")
                    ),
                );
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tenki");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert_eq!(config.forecast.endpoint, DEFAULT_FORECAST_ENDPOINT);
        assert!(config.location.fixed_position().is_none());
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = Config::default();
        config.forecast.endpoint = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "forecast.endpoint"));
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let mut config = Config::default();
        config.forecast.endpoint = "ftp://api.open-meteo.com/v1/forecast".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.forecast.timeout_secs = 0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "forecast.timeout_secs"));
    }

    #[test]
    fn test_long_timeout_is_warning() {
        let mut config = Config::default();
        config.forecast.timeout_secs = 600;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "forecast.timeout_secs"));
    }

    #[test]
    fn test_forecast_days_range() {
        let mut config = Config::default();
        config.forecast.forecast_days = Some(16);
        assert!(config.validate().is_valid());

        config.forecast.forecast_days = Some(0);
        assert!(!config.validate().is_valid());

        config.forecast.forecast_days = Some(17);
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_partial_location_is_error() {
        let mut config = Config::default();
        config.location.latitude = Some(35.6895);
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location"));
        assert!(config.location.fixed_position().is_none());
    }

    #[test]
    fn test_location_out_of_range() {
        let mut config = Config::default();
        config.location.latitude = Some(91.0);
        config.location.longitude = Some(-181.0);
        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_fixed_position() {
        let mut config = Config::default();
        config.location.latitude = Some(35.6895);
        config.location.longitude = Some(139.6917);
        assert!(config.validate().is_valid());
        assert_eq!(config.location.fixed_position(), Some((35.6895, 139.6917)));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_from_missing_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.forecast.timeout_secs, 10);
    }

    #[test]
    fn test_save_and_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.default_timezone = Some("Asia/Tokyo".to_string());
        config.forecast.forecast_days = Some(3);
        config.location.latitude = Some(35.6895);
        config.location.longitude = Some(139.6917);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(loaded.forecast.forecast_days, Some(3));
        assert_eq!(loaded.location.fixed_position(), Some((35.6895, 139.6917)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_timezone = \"Asia/Tokyo\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.forecast.endpoint, DEFAULT_FORECAST_ENDPOINT);
        assert!(loaded.location.fixed_position().is_none());
    }

    #[test]
    fn test_file_without_config_dir_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = r#"
default_timezone = "Asia/Tokyo"

[location]
latitude = 35.6895
longitude = 139.6917
"#;
        std::fs::write(&path, contents).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_timezone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(loaded.location.fixed_position(), Some((35.6895, 139.6917)));
        assert_eq!(loaded.config_dir, dir.path());
        assert!(loaded.validate().is_valid());
    }

    #[test]
    fn test_saved_file_omits_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("config_dir"));
    }

    #[test]
    fn test_unsupported_timezone_is_error() {
        let mut config = Config::default();
        config.default_timezone = Some("Europe/Paris".to_string());
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "default_timezone"));
    }

    #[test]
    fn test_supported_timezones_are_valid() {
        let mut config = Config::default();
        for tz in SUPPORTED_TIMEZONES {
            config.default_timezone = Some(tz.to_string());
            assert!(config.validate().is_valid(), "{} should be accepted", tz);
        }
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_into_validated_rejects_errors() {
        let mut config = Config::default();
        config.forecast.timeout_secs = 0;
        let err = config.into_validated().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Invalid(_))
        ));
    }
}
