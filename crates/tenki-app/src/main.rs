use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tenki_app::ForecastModel;
use tenki_core::Config;
use tenki_weather::{Coordinates, FixedLocation, OpenMeteoProvider, SharedLocation};

#[tokio::main]
async fn main() -> Result<()> {
    tenki_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let mut provider = OpenMeteoProvider::with_endpoint(
        &config.forecast.endpoint,
        Duration::from_secs(config.forecast.timeout_secs),
    )
    .context("Failed to create forecast provider")?;
    if let Some(days) = config.forecast.forecast_days {
        provider = provider.with_forecast_days(days);
    }

    let location = config.location.fixed_position().map(|(lat, lon)| {
        Arc::new(FixedLocation::new(Coordinates::new(lat, lon))) as SharedLocation
    });

    let mut model = ForecastModel::new(
        tokio::runtime::Handle::current(),
        location,
        Arc::new(provider),
    );

    if let Some(tz) = &config.default_timezone {
        model
            .select_timezone(tz)
            .context("Invalid default_timezone in config")?;
    }

    println!("Tenki - Daily Forecast");

    model.acquire_location();
    while model.next_update().await {}

    match model.state().coordinates() {
        Some(coords) => {
            println!("Latitude:  {}", coords.latitude);
            println!("Longitude: {}", coords.longitude);
        }
        None => {
            println!("\n{}", model.state().error_message().unwrap_or_default());
            println!("Set location.latitude and location.longitude in the config file.");
            return Ok(());
        }
    }

    model.fetch_forecast();
    while model.next_update().await {}

    if let Some(message) = model.state().error_message() {
        println!("\n{}", message);
    }

    if let Some(forecast) = model.state().forecast() {
        let timezone = model
            .state()
            .timezone()
            .map(|tz| tz.as_str())
            .unwrap_or_default();
        println!("\n{}-day forecast ({})", forecast.len(), timezone);
        for day in &forecast.days {
            println!(
                "  {}: min {}°C, max {}°C",
                day.date.format("%Y-%m-%d"),
                day.min_temperature_c,
                day.max_temperature_c
            );
        }
    }

    Ok(())
}
