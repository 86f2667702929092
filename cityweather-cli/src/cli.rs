use anyhow::Context;
use chrono::{Local, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use cityweather_core::{
    ByDateView, Config, HomeView, ObserverZone, WeatherProvider, date_report, home_report,
    provider_from_config, relative_date,
};
use inquire::{DateSelect, Password, PasswordDisplayMode, Text};

use crate::render;

/// How far ahead the free forecast endpoint reaches.
const FORECAST_HORIZON_DAYS: u64 = 5;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "cityweather",
    version,
    about = "Current weather and short-range forecast by city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Time zone used to decide which calendar day a forecast sample belongs to.
    /// Defaults to the value in the config file, or `local`.
    #[arg(long, value_enum, global = true)]
    pub zone: Option<ZoneArg>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoneArg {
    /// The system's local time zone.
    Local,
    /// The UTC offset reported for the forecast's city.
    City,
}

impl From<ZoneArg> for ObserverZone {
    fn from(value: ZoneArg) -> Self {
        match value {
            ZoneArg::Local => ObserverZone::Local,
            ZoneArg::City => ObserverZone::City,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather, tomorrow and the day after tomorrow.
    Show {
        /// City name, e.g. "London" or "London,GB".
        city: String,
    },

    /// Show the forecast for one date.
    On {
        /// City name.
        city: String,

        /// Date as YYYY-MM-DD; if absent, a date picker is shown.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Look up cities one after another until an empty name is entered.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let zone = self.zone;

        match self.command {
            Command::Configure => configure()?,
            Command::Show { city } => {
                let (provider, zone) = session(zone)?;
                let mut view = HomeView::default();
                show_home(provider.as_ref(), &mut view, &city, zone).await;
                print!("{}", render::home(&view));
            }
            Command::On { city, date } => {
                let (provider, zone) = session(zone)?;
                let date = match date {
                    Some(date) => date,
                    None => pick_date()?,
                };
                let mut view = ByDateView::default();
                view.city = city;
                view.date = Some(date);
                show_by_date(provider.as_ref(), &mut view, zone).await;
                print!("{}", render::by_date(&view));
            }
            Command::Interactive => {
                let (provider, zone) = session(zone)?;
                interactive(provider.as_ref(), zone).await?;
            }
        }

        Ok(())
    }
}

/// Loads config and builds the provider. `--zone` overrides the configured zone.
fn session(zone: Option<ZoneArg>) -> anyhow::Result<(Box<dyn WeatherProvider>, ObserverZone)> {
    let config = Config::load()?;
    let zone = zone.map(ObserverZone::from).unwrap_or(config.zone);
    let provider = provider_from_config(&config)?;
    tracing::debug!(%zone, base_url = config.base_url(), "provider ready");
    Ok((provider, zone))
}

async fn show_home(
    provider: &dyn WeatherProvider,
    view: &mut HomeView,
    city: &str,
    zone: ObserverZone,
) {
    let ticket = view.submit();
    let result = home_report(provider, city, zone, Utc::now()).await;
    view.apply(ticket, result);
}

async fn show_by_date(provider: &dyn WeatherProvider, view: &mut ByDateView, zone: ObserverZone) {
    let Some((ticket, city, date)) = view.submit() else {
        tracing::info!("city or date missing, nothing to fetch");
        return;
    };
    let result = date_report(provider, &city, date, zone).await;
    view.apply(ticket, result);
}

async fn interactive(provider: &dyn WeatherProvider, zone: ObserverZone) -> anyhow::Result<()> {
    let mut view = HomeView::default();

    loop {
        let city = Text::new("Enter city:")
            .with_help_message("leave empty to quit")
            .prompt()?;
        if city.trim().is_empty() {
            return Ok(());
        }

        show_home(provider, &mut view, &city, zone).await;
        println!("{}", render::home(&view));
    }
}

fn pick_date() -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive();
    let mut picker = DateSelect::new("Forecast date:").with_min_date(today);
    if let Some(tomorrow) = relative_date(today, 1) {
        picker = picker.with_starting_date(tomorrow);
    }
    if let Some(last) = relative_date(today, FORECAST_HORIZON_DAYS) {
        picker = picker.with_max_date(last);
    }
    Ok(picker.prompt()?)
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    // File contents only: a key coming from the environment must not be persisted.
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
