//! Host location capability.
//!
//! The host decides where positions come from (OS service, browser bridge,
//! configuration). A missing capability is modeled as `None` by the caller,
//! not as an error from this trait.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::LocationError;
use crate::types::Coordinates;

/// Source of the device's current position.
///
/// Each call to `current_position` resolves exactly once, to a position or
/// a failure.
#[async_trait]
pub trait LocationCapability: Send + Sync {
    /// Whether the host currently exposes this capability
    fn is_available(&self) -> bool {
        true
    }

    /// One-shot position request
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

pub type SharedLocation = Arc<dyn LocationCapability>;

/// Request the current position, rejecting non-finite readings.
pub async fn current_location(
    capability: &dyn LocationCapability,
) -> Result<Coordinates, LocationError> {
    let coords = capability.current_position().await?;

    if !coords.is_finite() {
        return Err(LocationError::InvalidPosition {
            latitude: coords.latitude,
            longitude: coords.longitude,
        });
    }

    Ok(coords)
}

/// Capability that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationCapability for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}
