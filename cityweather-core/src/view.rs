//! Display state for the two screens.
//!
//! Each submission takes a [`RequestTicket`]; only the result for the most
//! recent ticket is applied, so an older response arriving late never
//! overwrites a newer one. Any fetch failure wipes the weather currently on
//! screen and shows a fixed message.

use chrono::NaiveDate;

use crate::{
    error::FetchError,
    model::{CurrentWeather, ForecastSample},
    report::{DateReport, HomeReport},
};

pub const HOME_ERROR: &str = "City not found";
pub const BY_DATE_ERROR: &str = "Error fetching weather for the selected date";

/// Identifies one submission of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
struct TicketCounter {
    latest: u64,
}

impl TicketCounter {
    fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Current weather and the next two days for one city.
#[derive(Debug, Default)]
pub struct HomeView {
    tickets: TicketCounter,
    pub city: String,
    pub current: Option<CurrentWeather>,
    pub tomorrow: Option<ForecastSample>,
    pub day_after: Option<ForecastSample>,
    pub error: Option<&'static str>,
}

impl HomeView {
    pub fn submit(&mut self) -> RequestTicket {
        self.tickets.issue()
    }

    /// Applies a finished request. Returns `false` when `ticket` is stale and
    /// the result was discarded.
    pub fn apply(&mut self, ticket: RequestTicket, result: Result<HomeReport, FetchError>) -> bool {
        if !self.tickets.is_current(ticket) {
            tracing::debug!(?ticket, "discarding stale home result");
            return false;
        }

        match result {
            Ok(report) => {
                self.city = report.city;
                self.current = Some(report.current);
                self.tomorrow = report.tomorrow;
                self.day_after = report.day_after;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "home fetch failed");
                self.current = None;
                self.tomorrow = None;
                self.day_after = None;
                self.error = Some(HOME_ERROR);
            }
        }
        true
    }

    pub fn has_weather(&self) -> bool {
        self.current.is_some()
    }
}

/// Forecast for a user-picked date.
#[derive(Debug, Default)]
pub struct ByDateView {
    tickets: TicketCounter,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub sample: Option<ForecastSample>,
    pub error: Option<&'static str>,
}

impl ByDateView {
    /// Starts a request for the current city and date, or returns `None`
    /// when either is missing and nothing should be fetched.
    pub fn submit(&mut self) -> Option<(RequestTicket, String, NaiveDate)> {
        let city = self.city.trim();
        let date = self.date?;
        if city.is_empty() {
            return None;
        }
        let city = city.to_string();
        Some((self.tickets.issue(), city, date))
    }

    pub fn apply(&mut self, ticket: RequestTicket, result: Result<DateReport, FetchError>) -> bool {
        if !self.tickets.is_current(ticket) {
            tracing::debug!(?ticket, "discarding stale by-date result");
            return false;
        }

        match result {
            Ok(report) => {
                self.sample = report.sample;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "by-date fetch failed");
                self.sample = None;
                self.error = Some(BY_DATE_ERROR);
            }
        }
        true
    }
}
