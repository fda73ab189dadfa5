use serde_json::{Number, Value};
use std::{collections::BTreeSet, str::FromStr};

/// One independently requestable piece of weather information.
///
/// Variant order is the order fields appear in the printed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Time,
    Temperature,
    Pressure,
    Cloud,
    Humidity,
    Wind,
    Sunset,
    Sunrise,
}

impl Field {
    /// Flag name on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Temperature => "temp",
            Field::Pressure => "pressure",
            Field::Cloud => "cloud",
            Field::Humidity => "humidity",
            Field::Wind => "wind",
            Field::Sunset => "sunset",
            Field::Sunrise => "sunrise",
        }
    }

    /// Name used in the field's retrieval error message.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Time => "Time",
            Field::Temperature => "Temperature",
            Field::Pressure => "Pressure",
            Field::Cloud => "Cloud data",
            Field::Humidity => "Humidity",
            Field::Wind => "Wind data",
            Field::Sunset => "Sunset data",
            Field::Sunrise => "Sunrise data",
        }
    }

    pub const fn all() -> &'static [Field] {
        &[
            Field::Time,
            Field::Temperature,
            Field::Pressure,
            Field::Cloud,
            Field::Humidity,
            Field::Wind,
            Field::Sunset,
            Field::Sunrise,
        ]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl FromStr for TemperatureUnit {
    type Err = crate::FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "celsius" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(crate::FieldError::InvalidTemperatureUnit),
        }
    }
}

pub const DEFAULT_TEMPERATURE_UNIT: &str = "celsius";

/// Parsed user intent for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub city_id: Option<String>,
    /// `lat,lon`
    pub coordinates: Option<String>,
    /// `zip[,country]`
    pub postal_code: Option<String>,
    pub fields: BTreeSet<Field>,
    /// Raw unit string; validated only when the temperature is rendered.
    pub temperature_unit: Option<String>,
    pub help: bool,
}

impl RequestOptions {
    /// API key, if one was given and is non-empty.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn temperature_unit(&self) -> &str {
        self.temperature_unit.as_deref().unwrap_or(DEFAULT_TEMPERATURE_UNIT)
    }

    pub fn wants(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The single active way of identifying a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationSelector {
    City(String),
    CityId(String),
    Coordinates { lat: String, lon: String },
    PostalCode { code: String, country: Option<String> },
}

impl LocationSelector {
    /// Query parameters identifying this location on the `weather` endpoint.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationSelector::City(name) => vec![("q", name.clone())],
            LocationSelector::CityId(id) => vec![("id", id.clone())],
            LocationSelector::Coordinates { lat, lon } => {
                vec![("lat", lat.clone()), ("lon", lon.clone())]
            }
            LocationSelector::PostalCode { code, country: Some(country) } => {
                vec![("zip", format!("{code},{country}"))]
            }
            LocationSelector::PostalCode { code, country: None } => vec![("zip", code.clone())],
        }
    }

    /// How the mode is named in fetch error messages.
    pub fn mode(&self) -> &'static str {
        match self {
            LocationSelector::City(_) => "-city",
            LocationSelector::CityId(_) => "city ID -cid",
            LocationSelector::Coordinates { .. } => "coordinates -gc",
            LocationSelector::PostalCode { .. } => "zip code -z",
        }
    }
}

/// Decoded service response. Any sub-field may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord(Value);

impl WeatherRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |node, key| node.get(key))
    }

    pub fn number(&self, path: &[&str]) -> Option<&Number> {
        match self.get(path)? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Epoch seconds; fractional values are truncated.
    pub fn timestamp(&self, path: &[&str]) -> Option<i64> {
        let n = self.number(path)?;
        n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
    }

    pub fn cod(&self) -> Option<&Value> {
        self.get(&["cod"])
    }

    pub fn message(&self) -> &str {
        self.get(&["message"]).and_then(Value::as_str).unwrap_or("unknown error")
    }
}
