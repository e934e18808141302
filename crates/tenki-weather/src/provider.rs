//! Daily forecasts from the Open-Meteo API.
//! Free, no API key required.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::error::ForecastError;
use crate::types::{DailyForecast, Forecast, ForecastQuery};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Remote forecast source
#[async_trait]
pub trait ForecastService: Send + Sync {
    async fn fetch(&self, query: &ForecastQuery) -> Result<Forecast, ForecastError>;
}

pub type SharedForecastService = Arc<dyn ForecastService>;

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: DailySeries,
}

/// Positionally aligned daily arrays as returned by Open-Meteo
#[derive(Debug, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Arc<Client>,
    endpoint: Url,
    forecast_days: Option<u8>,
}

impl OpenMeteoProvider {
    /// Provider for the public Open-Meteo endpoint
    pub fn new() -> Result<Self, ForecastError> {
        Self::with_endpoint(OPEN_METEO_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Provider for a custom endpoint (self-hosted instance or test server)
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ForecastError::InvalidEndpoint(e.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoint,
            forecast_days: None,
        })
    }

    /// Request a specific number of days instead of the service default (7)
    pub fn with_forecast_days(mut self, days: u8) -> Self {
        self.forecast_days = Some(days);
        self
    }

    /// Build the request URL for `query`
    pub fn build_url(&self, query: &ForecastQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("latitude", &query.coordinates.latitude.to_string())
                .append_pair("longitude", &query.coordinates.longitude.to_string())
                .append_pair("timezone", query.timezone.as_str())
                .append_pair("daily", DAILY_METRICS);
            if let Some(days) = self.forecast_days {
                pairs.append_pair("forecast_days", &days.to_string());
            }
        }
        url
    }
}

#[async_trait]
impl ForecastService for OpenMeteoProvider {
    #[instrument(skip(self), level = "info")]
    async fn fetch(&self, query: &ForecastQuery) -> Result<Forecast, ForecastError> {
        let url = self.build_url(query);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Forecast request returned status {}", status);
            return Err(ForecastError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: OpenMeteoResponse =
            serde_json::from_slice(&body).map_err(|e| ForecastError::Parse(e.to_string()))?;

        let days = parse_daily(parsed.daily)?;
        tracing::info!("Fetched {} forecast days for {}", days.len(), query.timezone);

        Ok(Forecast {
            days,
            fetched_at: Utc::now(),
        })
    }
}

/// Zip the daily arrays into one entry per day.
///
/// Index `i` of every array describes day `i`. Arrays of different lengths
/// are rejected rather than truncated.
pub fn parse_daily(series: DailySeries) -> Result<Vec<DailyForecast>, ForecastError> {
    let DailySeries {
        time,
        temperature_min,
        temperature_max,
    } = series;

    if time.len() != temperature_min.len() || time.len() != temperature_max.len() {
        return Err(ForecastError::MismatchedSeries {
            dates: time.len(),
            min: temperature_min.len(),
            max: temperature_max.len(),
        });
    }

    time.iter()
        .zip(temperature_min)
        .zip(temperature_max)
        .map(|((date, min), max)| -> Result<DailyForecast, ForecastError> {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
                .map_err(|_| ForecastError::InvalidDate(date.clone()))?;
            Ok(DailyForecast {
                date,
                min_temperature_c: min,
                max_temperature_c: max,
            })
        })
        .collect()
}
