use crate::{
    Config, CurrentWeather, FetchError, ForecastPayload,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError>;

    /// Multi-day forecast for `city`, ascending by timestamp.
    async fn forecast(&self, city: &str) -> Result<ForecastPayload, FetchError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `cityweather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider =
        OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url(), config.timeout())?;

    Ok(Box::new(provider))
}
