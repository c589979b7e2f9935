use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::WeatherError;

/// Raw query parameters accepted by the weather endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// The upstream lookup chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherQuery {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl QueryParams {
    pub fn city(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()), ..Self::default() }
    }

    pub fn coordinates(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self { city: None, lat: Some(lat.into()), lon: Some(lon.into()) }
    }

    /// Parse a raw query string. Repeated keys resolve to their last value;
    /// unknown keys are ignored.
    pub fn from_query_str(raw: &str) -> Self {
        let mut params = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "city" => &mut params.city,
                "lat" => &mut params.lat,
                "lon" => &mut params.lon,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }

        params
    }

    /// Pick the lookup mode. A non-empty city always wins over coordinates;
    /// empty strings are treated as absent.
    pub fn resolve(&self) -> Result<WeatherQuery, WeatherError> {
        if let Some(city) = non_empty(&self.city) {
            return Ok(WeatherQuery::City(city.to_string()));
        }

        match (non_empty(&self.lat), non_empty(&self.lon)) {
            (Some(lat), Some(lon)) => Ok(WeatherQuery::Coordinates {
                lat: lat.to_string(),
                lon: lon.to_string(),
            }),
            _ => Err(WeatherError::MissingParameters),
        }
    }
}

impl WeatherQuery {
    pub fn mode(&self) -> &'static str {
        match self {
            WeatherQuery::City(_) => "city",
            WeatherQuery::Coordinates { .. } => "coordinates",
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_takes_precedence_over_coordinates() {
        let params = QueryParams {
            city: Some("London".into()),
            lat: Some("51.5".into()),
            lon: Some("-0.1".into()),
        };

        assert_eq!(params.resolve().unwrap(), WeatherQuery::City("London".into()));
    }

    #[test]
    fn coordinates_used_when_city_absent() {
        let query = QueryParams::coordinates("51.5", "-0.1").resolve().unwrap();

        assert_eq!(
            query,
            WeatherQuery::Coordinates { lat: "51.5".into(), lon: "-0.1".into() }
        );
        assert_eq!(query.mode(), "coordinates");
    }

    #[test]
    fn empty_city_falls_back_to_coordinates() {
        let params = QueryParams {
            city: Some(String::new()),
            lat: Some("10".into()),
            lon: Some("20".into()),
        };

        assert_eq!(params.resolve().unwrap().mode(), "coordinates");
    }

    #[test]
    fn empty_city_without_coordinates_is_missing() {
        let err = QueryParams::city("").resolve().unwrap_err();
        assert!(matches!(err, WeatherError::MissingParameters));
    }

    #[test]
    fn no_parameters_is_missing() {
        let err = QueryParams::default().resolve().unwrap_err();
        assert!(matches!(err, WeatherError::MissingParameters));
    }

    #[test]
    fn single_coordinate_is_missing() {
        let params = QueryParams { lat: Some("51.5".into()), ..QueryParams::default() };
        assert!(matches!(params.resolve(), Err(WeatherError::MissingParameters)));

        let params = QueryParams {
            lat: Some("51.5".into()),
            lon: Some(String::new()),
            ..QueryParams::default()
        };
        assert!(matches!(params.resolve(), Err(WeatherError::MissingParameters)));
    }

    #[test]
    fn query_string_repeated_keys_keep_last_value() {
        let params = QueryParams::from_query_str("city=London&city=Paris&units=imperial");

        assert_eq!(params.city.as_deref(), Some("Paris"));
        assert_eq!(params.resolve().unwrap(), WeatherQuery::City("Paris".into()));
    }

    #[test]
    fn query_string_values_are_decoded() {
        let params = QueryParams::from_query_str("lat=51.5&lon=-0.1&city=San+Jos%C3%A9");

        assert_eq!(params.city.as_deref(), Some("San José"));
        assert_eq!(params.lat.as_deref(), Some("51.5"));
        assert_eq!(params.lon.as_deref(), Some("-0.1"));
    }

    #[test]
    fn query_string_empty_value_is_present_but_empty() {
        let params = QueryParams::from_query_str("city=");

        assert_eq!(params.city.as_deref(), Some(""));
        assert!(matches!(params.resolve(), Err(WeatherError::MissingParameters)));
    }

    #[test]
    fn empty_query_string_has_no_parameters() {
        let params = QueryParams::from_query_str("");
        assert!(params.city.is_none() && params.lat.is_none() && params.lon.is_none());
    }

    #[test]
    fn deserializes_from_query_string_shape() {
        let params: QueryParams =
            serde_json::from_value(serde_json::json!({ "city": "Paris" })).unwrap();

        assert_eq!(params.city.as_deref(), Some("Paris"));
        assert!(params.lat.is_none());
        assert!(params.lon.is_none());
    }
}
