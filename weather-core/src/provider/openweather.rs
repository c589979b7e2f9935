use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::WeatherError, model::WeatherQuery};

use super::WeatherProvider;

/// Relays lookups to the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Build the outbound URL for `query`. Depends only on the query and this
    /// provider's key and base URL. `/weather` is appended as a path segment, so
    /// any query string already on the base URL is kept ahead of the lookup pairs.
    pub fn request_url(&self, query: &WeatherQuery) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&self.base_url)?;

        url.path_segments_mut()
            .map_err(|_| WeatherError::UnsupportedBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("weather");

        {
            let mut pairs = url.query_pairs_mut();
            match query {
                WeatherQuery::City(city) => {
                    pairs.append_pair("q", city);
                }
                WeatherQuery::Coordinates { lat, lon } => {
                    pairs.append_pair("lat", lat).append_pair("lon", lon);
                }
            }
            pairs.append_pair("appid", &self.api_key).append_pair("units", "metric");
        }

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, query: &WeatherQuery) -> Result<Value, WeatherError> {
        let url = self.request_url(query)?;
        debug!(mode = query.mode(), "requesting OpenWeather current weather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // The payload is relayed as-is; the upstream status is only reported.
            warn!(%status, mode = query.mode(), "OpenWeather answered with a non-success status");
        }

        Ok(serde_json::from_str(&body)?)
    }
}
