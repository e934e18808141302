//! Forecast orchestration core for Tenki
//!
//! Location acquisition behind a host capability, daily forecasts from the
//! Open-Meteo API, and the single state record both operations update.

pub mod error;
pub mod location;
pub mod provider;
pub mod state;
pub mod types;

pub use error::{ErrorKind, ForecastError, LocationError};
pub use location::{FixedLocation, LocationCapability, SharedLocation};
pub use provider::{ForecastService, OpenMeteoProvider, SharedForecastService};
pub use state::{AppState, StateEvent};
pub use types::*;
