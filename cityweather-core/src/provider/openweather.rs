use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::{FetchError, SampleError},
    model::{Condition, CurrentWeather, ForecastPayload, ForecastSample},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_base_url(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let base_url: String = base_url.into();
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    /// GET `{base_url}/{endpoint}` for `city` and return the raw body.
    async fn get(&self, endpoint: &str, city: &str) -> Result<String, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, city, "requesting OpenWeather {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::LocationNotFound(city.to_string()));
        }
        if !status.is_success() {
            tracing::debug!(%status, "OpenWeather {endpoint} request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, FetchError> {
        let body = self.get("weather", city).await?;
        decode_current(&body)
    }

    async fn forecast(&self, city: &str) -> Result<ForecastPayload, FetchError> {
        let body = self.get("forecast", city).await?;
        let payload = decode_forecast(&body)?;
        tracing::debug!(samples = payload.len(), city, "decoded OpenWeather forecast");
        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    /// Shift in seconds from UTC.
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
    city: Option<OwCity>,
}

fn condition(weather: Vec<OwWeather>) -> Result<Condition, SampleError> {
    let first = weather.into_iter().next().ok_or(SampleError::MissingCondition)?;
    Ok(Condition {
        icon: first.icon,
        description: first.description,
    })
}

fn humidity(value: i64) -> Result<u8, SampleError> {
    u8::try_from(value)
        .ok()
        .filter(|h| *h <= 100)
        .ok_or(SampleError::HumidityOutOfRange(value))
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = SampleError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let timestamp =
            DateTime::from_timestamp(entry.dt, 0).ok_or(SampleError::InvalidTimestamp(entry.dt))?;
        Ok(ForecastSample {
            timestamp,
            temperature_c: entry.main.temp,
            humidity_pct: humidity(entry.main.humidity)?,
            condition: condition(entry.weather)?,
        })
    }
}

fn decode_current(body: &str) -> Result<CurrentWeather, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    Ok(CurrentWeather {
        temperature_c: parsed.main.temp,
        humidity_pct: humidity(parsed.main.humidity)?,
        condition: condition(parsed.weather)?,
    })
}

/// Decodes a forecast body. Entries that fail validation are dropped.
fn decode_forecast(body: &str) -> Result<ForecastPayload, FetchError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;

    let samples = parsed
        .list
        .into_iter()
        .filter_map(|entry| {
            let dt = entry.dt;
            ForecastSample::try_from(entry)
                .inspect_err(|err| tracing::warn!(dt, %err, "skipping forecast entry"))
                .ok()
        })
        .collect();

    let city_offset = parsed
        .city
        .and_then(|c| c.timezone)
        .and_then(FixedOffset::east_opt);

    Ok(ForecastPayload::new(samples).with_city_offset(city_offset))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORECAST: &str = r#"{
        "cod": "200",
        "list": [
            {"dt": 1710064800, "main": {"temp": 14.2, "humidity": 61},
             "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}]},
            {"dt": 1710054000, "main": {"temp": 11.0, "humidity": 70},
             "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}]},
            {"dt": 1710075600, "main": {"temp": 12.5, "humidity": 140},
             "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]},
            {"dt": 1710086400, "main": {"temp": 9.1, "humidity": 80}, "weather": []}
        ],
        "city": {"name": "Lisbon", "country": "PT", "timezone": 3600}
    }"#;

    #[test]
    fn decode_forecast_orders_and_validates_entries() {
        let payload = decode_forecast(FORECAST).expect("decodes");

        let ts: Vec<i64> = payload.samples().iter().map(|s| s.timestamp.timestamp()).collect();
        assert_eq!(ts, vec![1_710_054_000, 1_710_064_800]);
        assert_eq!(payload.samples()[0].condition.description, "few clouds");
        assert_eq!(payload.city_offset(), FixedOffset::east_opt(3600));
    }

    #[test]
    fn decode_forecast_without_city_block() {
        let payload = decode_forecast(r#"{"list": []}"#).expect("decodes");
        assert!(payload.is_empty());
        assert_eq!(payload.city_offset(), None);
    }

    #[test]
    fn decode_forecast_rejects_non_json() {
        let err = decode_forecast("<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn decode_current_reads_first_condition() {
        let body = r#"{
            "main": {"temp": 21.4, "humidity": 33, "feels_like": 20.0},
            "weather": [
                {"description": "scattered clouds", "icon": "03d"},
                {"description": "mist", "icon": "50d"}
            ],
            "name": "Porto"
        }"#;

        let current = decode_current(body).expect("decodes");
        assert_eq!(current.temperature_c, 21.4);
        assert_eq!(current.humidity_pct, 33);
        assert_eq!(current.condition.icon, "03d");
    }

    #[test]
    fn decode_current_without_condition_is_malformed() {
        let body = r#"{"main": {"temp": 1.0, "humidity": 10}, "weather": []}"#;
        let err = decode_current(body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(SampleError::MissingCondition)));
    }

    #[test]
    fn humidity_bounds() {
        assert_eq!(humidity(0), Ok(0));
        assert_eq!(humidity(100), Ok(100));
        assert_eq!(humidity(101), Err(SampleError::HumidityOutOfRange(101)));
        assert_eq!(humidity(-1), Err(SampleError::HumidityOutOfRange(-1)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }

    #[tokio::test]
    async fn blank_city_fails_without_request() {
        let provider = OpenWeatherProvider::with_base_url(
            "KEY".into(),
            "http://127.0.0.1:9",
            Duration::from_secs(1),
        )
        .expect("client");

        let err = provider.forecast("   ").await.unwrap_err();
        assert!(matches!(err, FetchError::EmptyCity));
    }
}
