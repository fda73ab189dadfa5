use crate::{LocationSelector, WeatherError, WeatherRecord};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Boundary to the remote weather service.
///
/// The key check and the data endpoints type the success code differently
/// (`"200"` vs `200`); implementations must keep both checks as they are.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Probe the service with `api_key` against a fixed reference city.
    async fn check_api_key(&self, api_key: &str) -> Result<(), WeatherError>;

    /// Current conditions for `location`.
    async fn current(
        &self,
        api_key: &str,
        location: &LocationSelector,
    ) -> Result<WeatherRecord, WeatherError>;
}
