use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic position reported by the location capability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True if both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Supported forecast timezones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timezone {
    #[serde(rename = "Africa/Cairo")]
    AfricaCairo,
    #[serde(rename = "Asia/Tokyo")]
    AsiaTokyo,
    #[serde(rename = "America/Los_Angeles")]
    AmericaLosAngeles,
    #[serde(rename = "Europe/London")]
    EuropeLondon,
    #[serde(rename = "Australia/Sydney")]
    AustraliaSydney,
}

impl Timezone {
    /// Every selectable timezone, in display order
    pub const ALL: [Timezone; 5] = [
        Timezone::AfricaCairo,
        Timezone::AsiaTokyo,
        Timezone::AmericaLosAngeles,
        Timezone::EuropeLondon,
        Timezone::AustraliaSydney,
    ];

    /// IANA identifier sent to the forecast service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfricaCairo => "Africa/Cairo",
            Self::AsiaTokyo => "Asia/Tokyo",
            Self::AmericaLosAngeles => "America/Los_Angeles",
            Self::EuropeLondon => "Europe/London",
            Self::AustraliaSydney => "Australia/Sydney",
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an identifier outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported timezone: {0}")]
pub struct UnknownTimezone(pub String);

impl FromStr for Timezone {
    type Err = UnknownTimezone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tz| tz.as_str() == s)
            .ok_or_else(|| UnknownTimezone(s.to_string()))
    }
}

/// One day of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temperature_c: f64,
    pub max_temperature_c: f64,
}

/// Complete forecast produced by one successful query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Days in chronological order, as returned by the service
    pub days: Vec<DailyForecast>,
    pub fetched_at: DateTime<Utc>,
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Validated inputs for a forecast request.
///
/// Only obtainable with both a position and a timezone, see
/// [`AppState::ready_query`](crate::AppState::ready_query).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastQuery {
    pub coordinates: Coordinates,
    pub timezone: Timezone,
}
