use crate::{Config, WeatherError, WeatherQuery, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

/// A weather data source whose JSON payload is relayed without reshaping.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform exactly one upstream lookup for `query`.
    async fn fetch(&self, query: &WeatherQuery) -> Result<Value, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather-server configure` or set {}.",
            crate::config::ENV_API_KEY
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned(), config.base_url())))
}
