//! Core library for the weather relay service.
//!
//! This crate defines:
//! - Configuration loading (file + environment)
//! - Query resolution (city vs. coordinates)
//! - Abstraction over the upstream weather provider
//! - The error taxonomy shared with the HTTP layer
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, ServerConfig};
pub use error::WeatherError;
pub use model::{QueryParams, WeatherQuery};
pub use provider::{WeatherProvider, provider_from_config};
