//! Shared application state and its single mutation entry point.
//!
//! Every change goes through [`AppState::apply`]. Coordinates are written
//! together, a forecast is replaced wholesale, and any successful operation
//! clears the error slot. Completions are applied in arrival order, so the
//! last one to arrive wins for the fields it touches.

use crate::error::{ErrorKind, ForecastError, LocationError};
use crate::types::{Coordinates, Forecast, ForecastQuery, Timezone};

/// State transitions produced by user actions and completed requests
#[derive(Debug)]
pub enum StateEvent {
    /// The user picked (or cleared) a timezone
    TimezoneSelected(Option<Timezone>),
    /// A location request was dispatched
    LocationStarted,
    /// No location capability is available
    LocationUnavailable,
    /// A location request finished
    LocationCompleted(Result<Coordinates, LocationError>),
    /// A forecast request was dispatched
    ForecastStarted,
    /// A forecast was requested before the inputs were ready
    ForecastRejected,
    /// A forecast request finished
    ForecastCompleted(Result<Forecast, ForecastError>),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    coordinates: Option<Coordinates>,
    timezone: Option<Timezone>,
    forecast: Option<Forecast>,
    error: Option<ErrorKind>,
    pending_location: usize,
    pending_forecast: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn timezone(&self) -> Option<Timezone> {
        self.timezone
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// UI text for the current error, if any
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.user_message())
    }

    /// True while at least one location request is outstanding
    pub fn is_locating(&self) -> bool {
        self.pending_location > 0
    }

    /// True while at least one forecast request is outstanding
    pub fn is_fetching(&self) -> bool {
        self.pending_forecast > 0
    }

    /// Both a position and a timezone are present
    pub fn is_ready(&self) -> bool {
        self.ready_query().is_some()
    }

    /// The forecast query for the current inputs, or `None` if either is missing
    pub fn ready_query(&self) -> Option<ForecastQuery> {
        Some(ForecastQuery {
            coordinates: self.coordinates?,
            timezone: self.timezone?,
        })
    }

    /// Apply one event
    pub fn apply(&mut self, event: StateEvent) {
        match event {
            StateEvent::TimezoneSelected(timezone) => {
                self.timezone = timezone;
            }
            StateEvent::LocationStarted => {
                self.pending_location += 1;
            }
            StateEvent::LocationUnavailable => {
                tracing::debug!("No location capability available");
                self.error = Some(ErrorKind::LocationUnsupported);
            }
            StateEvent::LocationCompleted(result) => {
                self.pending_location = self.pending_location.saturating_sub(1);
                match result {
                    Ok(coords) => {
                        tracing::info!("Got location: {}, {}", coords.latitude, coords.longitude);
                        self.coordinates = Some(coords);
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("Location request failed: {}", e);
                        self.error = Some(e.kind());
                    }
                }
            }
            StateEvent::ForecastStarted => {
                self.pending_forecast += 1;
            }
            StateEvent::ForecastRejected => {
                tracing::debug!(
                    "Forecast requested without inputs (coordinates: {}, timezone: {})",
                    self.coordinates.is_some(),
                    self.timezone.is_some()
                );
                self.error = Some(ErrorKind::MissingInput);
            }
            StateEvent::ForecastCompleted(result) => {
                self.pending_forecast = self.pending_forecast.saturating_sub(1);
                match result {
                    Ok(forecast) => {
                        tracing::info!("Forecast updated with {} days", forecast.len());
                        self.forecast = Some(forecast);
                        self.error = None;
                    }
                    Err(e) => {
                        tracing::warn!("Forecast fetch failed: {}", e);
                        self.error = Some(e.kind());
                    }
                }
            }
        }
    }
}
