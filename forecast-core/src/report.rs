//! Turns a [`WeatherRecord`] into the human-readable report line.
//!
//! Every requested field is rendered on its own. A field whose data is missing
//! renders as its error message instead and the rest of the report carries on.

use chrono::{DateTime, Utc};
use serde_json::Number;

use crate::{
    FieldError, WeatherError,
    model::{Field, RequestOptions, TemperatureUnit, WeatherRecord},
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S +00:00 (UTC)";

/// Outcome of rendering a single field.
pub type FieldResult = Result<String, FieldError>;

/// Render every requested field in report order, each followed by `". "`.
///
/// Field failures are folded into the text; only an empty field set fails.
pub fn render(record: &WeatherRecord, options: &RequestOptions) -> Result<String, WeatherError> {
    if options.fields.is_empty() {
        return Err(WeatherError::NoFieldsRequested);
    }

    let mut out = String::new();
    for field in Field::all().iter().filter(|f| options.wants(**f)) {
        let line = match extract(record, *field, options) {
            Ok(message) => message,
            Err(err) => {
                tracing::debug!(%field, error = %err, "field not rendered");
                err.to_string()
            }
        };
        out.push_str(&line);
        out.push_str(". ");
    }

    Ok(out)
}

pub fn extract(record: &WeatherRecord, field: Field, options: &RequestOptions) -> FieldResult {
    match field {
        Field::Time => {
            let at = epoch(record, &["dt"], field)?;
            Ok(format!("The current date and time is {at}"))
        }
        Field::Temperature => temperature(record, options.temperature_unit()),
        Field::Pressure => {
            let pressure = number(record, &["main", "pressure"], field)?;
            Ok(format!("Pressure is {pressure} hpa"))
        }
        Field::Cloud => {
            let cloud = number(record, &["clouds", "all"], field)?;
            Ok(format!("Cloud: {cloud}"))
        }
        Field::Humidity => {
            let humidity = number(record, &["main", "humidity"], field)?;
            Ok(format!("Humidity is {humidity}"))
        }
        Field::Wind => {
            let speed = number(record, &["wind", "speed"], field)?;
            let degree = number(record, &["wind", "deg"], field)?;
            Ok(format!("Wind speed is {speed} at degree of {degree}"))
        }
        Field::Sunset => {
            let at = epoch(record, &["sys", "sunset"], field)?;
            Ok(format!("Sunset at {at}"))
        }
        Field::Sunrise => {
            let at = epoch(record, &["sys", "sunrise"], field)?;
            Ok(format!("Sunrise at {at}"))
        }
    }
}

fn temperature(record: &WeatherRecord, unit: &str) -> FieldResult {
    let min = number(record, &["main", "temp_min"], Field::Temperature)?;
    let max = number(record, &["main", "temp_max"], Field::Temperature)?;

    match unit.parse::<TemperatureUnit>()? {
        TemperatureUnit::Celsius => Ok(format!("The temperature ranges from {min} C-{max} C")),
        TemperatureUnit::Fahrenheit => {
            let min = to_fahrenheit(min).ok_or(FieldError::Missing(Field::Temperature))?;
            let max = to_fahrenheit(max).ok_or(FieldError::Missing(Field::Temperature))?;
            Ok(format!("The temperature ranges from {min} F-{max} F"))
        }
    }
}

/// `F = C * 9/5 + 32`, rounded to two decimals with ties to even.
fn to_fahrenheit(celsius: &Number) -> Option<Number> {
    let c = celsius.as_f64()?;
    let f = ((c * 9.0 / 5.0 + 32.0) * 100.0).round_ties_even() / 100.0;
    Number::from_f64(f)
}

fn number<'a>(record: &'a WeatherRecord, path: &[&str], field: Field) -> Result<&'a Number, FieldError> {
    record.number(path).ok_or(FieldError::Missing(field))
}

fn epoch(record: &WeatherRecord, path: &[&str], field: Field) -> Result<String, FieldError> {
    record
        .timestamp(path)
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .map(|at| at.format(TIME_FORMAT).to_string())
        .ok_or(FieldError::Missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn london() -> WeatherRecord {
        WeatherRecord::new(json!({
            "coord": { "lon": -0.15, "lat": 49.70 },
            "weather": [
                { "id": 300, "main": "Drizzle", "description": "light intensity drizzle", "icon": "09d" }
            ],
            "base": "stations",
            "main": { "temp": 270.23, "pressure": 1009, "humidity": 72, "temp_min": 269.15, "temp_max": 278.15 },
            "visibility": 10000,
            "wind": { "speed": 3.1, "deg": 82 },
            "clouds": { "all": 90 },
            "dt": 1485789600,
            "sys": {
                "type": 1, "id": 5091, "message": 0.0103, "country": "GB",
                "sunrise": 1485762037, "sunset": 1485794875
            },
            "id": 2643743,
            "name": "London",
            "cod": 200
        }))
    }

    fn rejected() -> WeatherRecord {
        WeatherRecord::new(json!({ "cod": "404", "message": "fail message example" }))
    }

    fn with_unit(unit: &str) -> RequestOptions {
        RequestOptions { temperature_unit: Some(unit.to_string()), ..Default::default() }
    }

    fn with_fields(fields: &[Field]) -> RequestOptions {
        RequestOptions { fields: fields.iter().copied().collect::<BTreeSet<_>>(), ..Default::default() }
    }

    #[test]
    fn temperature_in_celsius_is_unmodified() {
        let got = extract(&london(), Field::Temperature, &with_unit("Celsius"));
        assert_eq!(got.as_deref(), Ok("The temperature ranges from 269.15 C-278.15 C"));
    }

    #[test]
    fn temperature_in_fahrenheit_is_rounded() {
        let got = extract(&london(), Field::Temperature, &with_unit("Fahrenheit"));
        assert_eq!(got.as_deref(), Ok("The temperature ranges from 516.47 F-532.67 F"));
    }

    #[test]
    fn whole_fahrenheit_values_keep_a_decimal() {
        let record = WeatherRecord::new(json!({ "main": { "temp_min": 0, "temp_max": 100 } }));
        let got = extract(&record, Field::Temperature, &with_unit("fahrenheit"));
        assert_eq!(got.as_deref(), Ok("The temperature ranges from 32.0 F-212.0 F"));
    }

    #[test]
    fn fahrenheit_halves_round_to_even() {
        let record = WeatherRecord::new(json!({ "main": { "temp_min": 0.625, "temp_max": 1.875 } }));
        let got = extract(&record, Field::Temperature, &with_unit("fahrenheit"));
        assert_eq!(got.as_deref(), Ok("The temperature ranges from 33.12 F-35.38 F"));
    }

    #[test]
    fn unsupported_unit_is_distinct_from_missing_data() {
        let invalid = extract(&london(), Field::Temperature, &with_unit("kelvin")).unwrap_err();
        assert_eq!(invalid.to_string(), "Invalid temperature format entered: temperature unable to display");

        let missing = extract(&rejected(), Field::Temperature, &with_unit("celsius")).unwrap_err();
        assert_eq!(missing.to_string(), "Error: Temperature retrieval error");
    }

    #[test]
    fn time_sunrise_and_sunset_render_in_utc() {
        let opts = RequestOptions::default();
        assert_eq!(
            extract(&london(), Field::Time, &opts).as_deref(),
            Ok("The current date and time is 2017-01-30 15:20:00 +00:00 (UTC)")
        );
        assert_eq!(
            extract(&london(), Field::Sunrise, &opts).as_deref(),
            Ok("Sunrise at 2017-01-30 07:40:37 +00:00 (UTC)")
        );
        assert_eq!(
            extract(&london(), Field::Sunset, &opts).as_deref(),
            Ok("Sunset at 2017-01-30 16:47:55 +00:00 (UTC)")
        );
    }

    #[test]
    fn scalar_fields_render_as_sent() {
        let opts = RequestOptions::default();
        assert_eq!(extract(&london(), Field::Pressure, &opts).as_deref(), Ok("Pressure is 1009 hpa"));
        assert_eq!(extract(&london(), Field::Cloud, &opts).as_deref(), Ok("Cloud: 90"));
        assert_eq!(extract(&london(), Field::Humidity, &opts).as_deref(), Ok("Humidity is 72"));
        assert_eq!(
            extract(&london(), Field::Wind, &opts).as_deref(),
            Ok("Wind speed is 3.1 at degree of 82")
        );
    }

    #[test]
    fn missing_data_yields_field_specific_errors() {
        let opts = RequestOptions::default();
        let expected = [
            (Field::Time, "Error: Time retrieval error"),
            (Field::Pressure, "Error: Pressure retrieval error"),
            (Field::Cloud, "Error: Cloud data retrieval error"),
            (Field::Humidity, "Error: Humidity retrieval error"),
            (Field::Wind, "Error: Wind data retrieval error"),
            (Field::Sunset, "Error: Sunset data retrieval error"),
            (Field::Sunrise, "Error: Sunrise data retrieval error"),
        ];

        for (field, message) in expected {
            let err = extract(&rejected(), field, &opts).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn wrong_shape_counts_as_missing() {
        let record = WeatherRecord::new(json!({ "main": { "pressure": "high" }, "wind": { "speed": 3.1 } }));
        let opts = RequestOptions::default();
        assert_eq!(extract(&record, Field::Pressure, &opts), Err(FieldError::Missing(Field::Pressure)));
        assert_eq!(extract(&record, Field::Wind, &opts), Err(FieldError::Missing(Field::Wind)));
    }

    #[test]
    fn report_follows_fixed_field_order() {
        let opts = with_fields(&[Field::Sunrise, Field::Pressure, Field::Time]);
        let report = render(&london(), &opts).expect("report");
        assert_eq!(
            report,
            "The current date and time is 2017-01-30 15:20:00 +00:00 (UTC). \
             Pressure is 1009 hpa. \
             Sunrise at 2017-01-30 07:40:37 +00:00 (UTC). "
        );
    }

    #[test]
    fn failed_fields_do_not_abort_the_report() {
        let opts = with_fields(&[Field::Pressure, Field::Cloud]);
        let report = render(&rejected(), &opts).expect("field errors are not fatal");
        assert_eq!(report, "Error: Pressure retrieval error. Error: Cloud data retrieval error. ");
    }

    #[test]
    fn empty_field_set_is_rejected() {
        assert_eq!(render(&london(), &RequestOptions::default()), Err(WeatherError::NoFieldsRequested));
    }
}
