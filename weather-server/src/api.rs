//! HTTP routes: `/` and `/api/weather`.
//!
//! The weather route relays the provider's JSON payload with status 200, or
//! answers with a fixed `{"error": ...}` body.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use weather_core::{
    QueryParams, WeatherError, WeatherProvider,
    error::{MISSING_PARAMETERS_MESSAGE, UPSTREAM_FAILURE_MESSAGE},
};

pub const WELCOME_MESSAGE: &str = "Welcome to the Weather API!";

#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Build the application router. `allowed_origins` empty means any origin.
pub fn router(state: AppState, allowed_origins: &[String]) -> anyhow::Result<Router> {
    Ok(Router::new()
        .route("/", get(home))
        .route("/api/weather", get(get_weather))
        .route("/api/weather/", get(get_weather))
        .layer(cors_layer(allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods([Method::GET]);

    if allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid allowed origin '{o}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn home() -> &'static str {
    WELCOME_MESSAGE
}

/// GET /api/weather?city=..|lat=..&lon=..
async fn get_weather(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, ApiError> {
    let params = QueryParams::from_query_str(raw.as_deref().unwrap_or_default());
    let query = params.resolve()?;
    info!(mode = query.mode(), "relaying weather lookup");

    let payload = state.provider.fetch(&query).await?;
    Ok(Json(payload))
}

/// Maps core errors onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WeatherError::MissingParameters => (StatusCode::BAD_REQUEST, MISSING_PARAMETERS_MESSAGE),
            err if err.is_upstream_error() => {
                warn!(error = %err, "weather provider request failed");
                (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE_MESSAGE)
            }
            err => {
                error!(error = %err, "weather lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
