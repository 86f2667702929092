//! Screen queries: one forecast fetch followed by one or more date selections.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastSample},
    provider::WeatherProvider,
    select::{ObserverZone, home_targets},
};

/// Current weather plus the next two days.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeReport {
    pub city: String,
    pub current: CurrentWeather,
    pub tomorrow: Option<ForecastSample>,
    pub day_after: Option<ForecastSample>,
}

/// Forecast for a single chosen date.
#[derive(Debug, Clone, PartialEq)]
pub struct DateReport {
    pub city: String,
    pub date: NaiveDate,
    pub sample: Option<ForecastSample>,
}

pub async fn home_report<P>(
    provider: &P,
    city: &str,
    zone: ObserverZone,
    now: DateTime<Utc>,
) -> Result<HomeReport, FetchError>
where
    P: WeatherProvider + ?Sized,
{
    let current = provider.current(city).await?;
    let forecast = provider.forecast(city).await?;

    let today = zone.today(&forecast, now);
    let (tomorrow, day_after) = home_targets(today);
    let pick = |date: Option<NaiveDate>| date.and_then(|d| zone.select(&forecast, d)).cloned();

    let report = HomeReport {
        city: city.trim().to_string(),
        current,
        tomorrow: pick(tomorrow),
        day_after: pick(day_after),
    };
    tracing::info!(
        city = %report.city,
        %today,
        tomorrow = report.tomorrow.is_some(),
        day_after = report.day_after.is_some(),
        "home report ready"
    );
    Ok(report)
}

pub async fn date_report<P>(
    provider: &P,
    city: &str,
    date: NaiveDate,
    zone: ObserverZone,
) -> Result<DateReport, FetchError>
where
    P: WeatherProvider + ?Sized,
{
    let forecast = provider.forecast(city).await?;
    let sample = zone.select(&forecast, date).cloned();

    if sample.is_none() {
        tracing::info!(%date, samples = forecast.len(), "no forecast sample for date");
    }

    Ok(DateReport {
        city: city.trim().to_string(),
        date,
        sample,
    })
}
