use crate::{
    WeatherError,
    model::{LocationSelector, RequestOptions, non_empty},
};

/// Pick the single location selector the user supplied.
pub fn resolve(options: &RequestOptions) -> Result<LocationSelector, WeatherError> {
    let city = non_empty(&options.city);
    let city_id = non_empty(&options.city_id);
    let coordinates = non_empty(&options.coordinates);
    let postal_code = non_empty(&options.postal_code);

    match (city, city_id, coordinates, postal_code) {
        (None, None, None, None) => Err(WeatherError::NoLocationSpecified),
        (Some(name), None, None, None) => Ok(LocationSelector::City(name.to_string())),
        (None, Some(id), None, None) => Ok(LocationSelector::CityId(id.to_string())),
        (None, None, Some(gc), None) => parse_coordinates(gc),
        (None, None, None, Some(zip)) => Ok(parse_postal_code(zip)),
        _ => Err(WeatherError::MultipleLocationsSpecified),
    }
}

/// Only the first two comma-separated parts are used.
fn parse_coordinates(input: &str) -> Result<LocationSelector, WeatherError> {
    let mut parts = input.split(',').map(str::trim);
    let (lat, lon) = parts
        .next()
        .zip(parts.next())
        .filter(|(lat, lon)| !lat.is_empty() && !lon.is_empty())
        .ok_or_else(|| WeatherError::InvalidCoordinates(input.to_string()))?;

    Ok(LocationSelector::Coordinates { lat: lat.to_string(), lon: lon.to_string() })
}

fn parse_postal_code(input: &str) -> LocationSelector {
    match input.split_once(',') {
        Some((code, country)) if !country.trim().is_empty() => LocationSelector::PostalCode {
            code: code.trim().to_string(),
            country: Some(country.trim().to_string()),
        },
        Some((code, _)) => LocationSelector::PostalCode { code: code.trim().to_string(), country: None },
        None => LocationSelector::PostalCode { code: input.trim().to_string(), country: None },
    }
}
