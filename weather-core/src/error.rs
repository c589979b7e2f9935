use thiserror::Error;

/// Message returned to clients when neither a city nor a coordinate pair is given.
pub const MISSING_PARAMETERS_MESSAGE: &str = "City or latitude/longitude parameters required.";

/// Message returned to clients when the upstream provider could not be used.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Upstream weather provider request failed.";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{}", MISSING_PARAMETERS_MESSAGE)]
    MissingParameters,

    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid provider URL: '{0}' cannot carry a path")]
    UnsupportedBaseUrl(String),

    /// Transport failure. The request URL is stripped since it carries the API key.
    #[error("Failed to reach weather provider: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("Weather provider returned a non-JSON body: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Upstream(err.without_url())
    }
}

impl WeatherError {
    /// True for faults caused by the caller rather than by the provider or our setup.
    pub fn is_client_error(&self) -> bool {
        matches!(self, WeatherError::MissingParameters)
    }

    /// True when the upstream provider was unreachable or answered with garbage.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, WeatherError::Upstream(_) | WeatherError::InvalidPayload(_))
    }
}
