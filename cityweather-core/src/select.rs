//! Forecast date selection.
//!
//! A forecast arrives as a flat list of 3-hourly samples. Screens ask for the
//! weather "on a date", which means the first sample whose calendar date, as
//! seen from the observer's time zone, equals that date.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ForecastPayload, ForecastSample};

/// Returns the earliest sample whose calendar date in `tz` equals `target`.
///
/// `samples` must be in ascending timestamp order, which [`ForecastPayload`]
/// guarantees. An empty slice, or a target outside the covered range, yields
/// `None`.
pub fn select_for_date<'a, Tz: TimeZone>(
    samples: &'a [ForecastSample],
    target: NaiveDate,
    tz: &Tz,
) -> Option<&'a ForecastSample> {
    samples.iter().find(|s| s.date_in(tz) == target)
}

/// Time zone used to turn sample instants into calendar dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverZone {
    /// The system's configured local time zone.
    #[default]
    Local,
    /// The fixed UTC offset the forecast reports for its city. Falls back to
    /// `Local` when the payload carries none.
    City,
}

impl ObserverZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverZone::Local => "local",
            ObserverZone::City => "city",
        }
    }

    /// Selects the sample for `target` from `payload` under this convention.
    pub fn select<'a>(
        &self,
        payload: &'a ForecastPayload,
        target: NaiveDate,
    ) -> Option<&'a ForecastSample> {
        match self.city_offset(payload) {
            Some(offset) => select_for_date(payload.samples(), target, &offset),
            None => select_for_date(payload.samples(), target, &Local),
        }
    }

    /// Calendar date of `now` under this convention.
    pub fn today(&self, payload: &ForecastPayload, now: DateTime<Utc>) -> NaiveDate {
        match self.city_offset(payload) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.with_timezone(&Local).date_naive(),
        }
    }

    fn city_offset(&self, payload: &ForecastPayload) -> Option<chrono::FixedOffset> {
        match self {
            ObserverZone::Local => None,
            ObserverZone::City => payload.city_offset(),
        }
    }
}

impl std::fmt::Display for ObserverZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `today` shifted forward by `days` calendar days.
pub fn relative_date(today: NaiveDate, days: u64) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(days))
}

/// Tomorrow and the day after tomorrow, as shown on the home screen.
pub fn home_targets(today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
    (relative_date(today, 1), relative_date(today, 2))
}
