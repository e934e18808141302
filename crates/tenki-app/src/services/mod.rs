//! Async backends for location and forecast requests.
//! Work runs on the tokio runtime; results come back as `ServiceMessage`s
//! on the model's channel.

mod forecast_service;
mod location_service;

pub use forecast_service::request_forecast;
pub use location_service::request_location;

use tenki_weather::{Coordinates, Forecast, ForecastError, LocationError};

/// Messages sent from async operations back to the model
#[derive(Debug)]
pub enum ServiceMessage {
    /// Result of a location request
    LocationDone(Result<Coordinates, LocationError>),
    /// Result of a forecast request
    ForecastDone(Result<Forecast, ForecastError>),
}
