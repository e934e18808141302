//! Orchestration layer between the presentation layer and the forecast core.

pub mod model;
pub mod services;

pub use model::ForecastModel;
pub use services::ServiceMessage;
