//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The request model (location selectors, requested fields)
//! - Location resolution and report formatting
//! - The weather service boundary and its OpenWeather client
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod report;
pub mod session;

pub use config::Config;
pub use error::{FieldError, WeatherError};
pub use model::{Field, LocationSelector, RequestOptions, TemperatureUnit, WeatherRecord};
pub use provider::{WeatherService, openweather::OpenWeatherClient};
pub use session::{Outcome, run};
