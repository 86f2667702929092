//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and typed decoding of its responses
//! - Forecast date selection in the observer's time zone
//! - Screen reports and their display state
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod select;
pub mod view;

pub use config::Config;
pub use error::{FetchError, SampleError};
pub use model::{Condition, CurrentWeather, ForecastPayload, ForecastSample};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use report::{DateReport, HomeReport, date_report, home_report};
pub use select::{ObserverZone, home_targets, relative_date, select_for_date};
pub use view::{ByDateView, HomeView, RequestTicket};
