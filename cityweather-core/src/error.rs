use thiserror::Error;

/// Failure to obtain weather data from the upstream provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("city name must not be empty")]
    EmptyCity,

    #[error("location '{0}' was not recognised by the weather provider")]
    LocationNotFound(String),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to reach the weather provider")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode weather provider response")]
    Decode(#[from] serde_json::Error),

    #[error("weather provider response is malformed: {0}")]
    Malformed(#[from] SampleError),
}

/// Reason a single provider entry was rejected at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("entry has no weather condition")]
    MissingCondition,

    #[error("humidity {0} is outside 0..=100")]
    HumidityOutOfRange(i64),

    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),
}
