//! Error types for location and forecast operations.
//!
//! `LocationError` and `ForecastError` carry the detailed cause. Both collapse
//! into an [`ErrorKind`], the single user-facing error slot kept in
//! [`AppState`](crate::AppState).

use thiserror::Error;

/// User-facing failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The host has no location capability
    LocationUnsupported,
    /// The location request failed for any reason
    LocationDenied,
    /// A forecast was requested without coordinates and a timezone
    MissingInput,
    /// Transport failure or unusable response from the forecast service
    ForecastFetchFailed,
}

impl ErrorKind {
    /// Message suitable for display in the UI
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LocationUnsupported => "Geolocation is not supported on this device.",
            Self::LocationDenied => "Failed to fetch location. Please allow location access.",
            Self::MissingInput => "Latitude, longitude, or timezone has not been selected.",
            Self::ForecastFetchFailed => "Failed to fetch weather data.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Location service errors
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("Location service unavailable")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location service returned an invalid position ({latitude}, {longitude})")]
    InvalidPosition { latitude: f64, longitude: f64 },
    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    /// Every cause other than a missing capability is reported as a denial.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported => ErrorKind::LocationUnsupported,
            _ => ErrorKind::LocationDenied,
        }
    }
}

/// Forecast provider errors
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Forecast service returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Daily series length mismatch: {dates} dates, {min} minimums, {max} maximums")]
    MismatchedSeries { dates: usize, min: usize, max: usize },
    #[error("Invalid forecast date: {0}")]
    InvalidDate(String),
    #[error("Invalid forecast endpoint: {0}")]
    InvalidEndpoint(String),
}

impl ForecastError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ForecastFetchFailed
    }
}
