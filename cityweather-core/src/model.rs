use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Weather condition as reported by the provider: an icon code such as
/// `"01d"` plus a human readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub icon: String,
    pub description: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon)
    }
}

/// Current conditions for a named location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub condition: Condition,
}

/// One entry of a multi-day forecast series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub condition: Condition,
}

impl ForecastSample {
    /// Calendar date of this sample as observed in `tz`.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }
}

/// Forecast samples in ascending timestamp order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastPayload {
    samples: Vec<ForecastSample>,
    /// UTC offset the provider reports for the forecast's city, if any.
    city_offset: Option<FixedOffset>,
}

impl ForecastPayload {
    /// Builds a payload, ordering the samples by timestamp. The sort is stable,
    /// so samples sharing a timestamp keep their provider order.
    pub fn new(mut samples: Vec<ForecastSample>) -> Self {
        samples.sort_by_key(|s| s.timestamp);
        Self {
            samples,
            city_offset: None,
        }
    }

    pub fn with_city_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.city_offset = offset;
        self
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn city_offset(&self) -> Option<FixedOffset> {
        self.city_offset
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
