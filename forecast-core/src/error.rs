use thiserror::Error;

use crate::model::Field;

/// Failures that abort a whole request. The `Display` text is the exact line
/// printed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("No location specified")]
    NoLocationSpecified,

    #[error("Multiple chosen locations are specified")]
    MultipleLocationsSpecified,

    #[error("Invalid coordinates '{0}': expected <lat>,<lon>")]
    InvalidCoordinates(String),

    #[error("Program cannot display help and chosen information at the same time")]
    HelpAndDataConflict,

    #[error("No argument chosen to display weather data")]
    NoFieldsRequested,

    #[error("No arguments provided")]
    NoArgumentsProvided,

    #[error("API key error: {0}")]
    InvalidApiKey(String),

    /// The service answered a data request with a non-success `cod`.
    #[error("Request {mode} error: {message}")]
    Fetch { mode: &'static str, message: String },

    #[error("Weather data retrieval error: {0}")]
    Transport(String),
}

/// Failure to render a single requested field. Never aborts sibling fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Error: {} retrieval error", .0.label())]
    Missing(Field),

    #[error("Invalid temperature format entered: temperature unable to display")]
    InvalidTemperatureUnit,
}
