use std::ffi::OsString;

use clap::{ArgAction, CommandFactory, Parser};
use forecast_core::{
    Config, Field, OpenWeatherClient, Outcome, RequestOptions, model::DEFAULT_TEMPERATURE_UNIT,
};

/// Flags accepted with a single leading dash, e.g. `-city=London`.
const LONG_FLAGS: &[&str] = &[
    "help", "api", "city", "cid", "gc", "z", "time", "temp", "pressure", "cloud", "humidity",
    "wind", "sunset", "sunrise",
];

/// Top-level CLI struct.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(
    name = "forecast",
    about = "Current weather conditions from OpenWeather",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Show how to use the program
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// API key used to call the weather service
    #[arg(long, value_name = "KEY")]
    pub api: Option<String>,

    /// Name of a city
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// City ID
    #[arg(long, value_name = "ID")]
    pub cid: Option<String>,

    /// Geographic coordinates of a city
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub gc: Option<String>,

    /// Zip code, optionally followed by a country code
    #[arg(long, value_name = "ZIP[,COUNTRY]")]
    pub z: Option<String>,

    /// Show the observation time
    #[arg(long)]
    pub time: bool,

    /// Show the temperature range (celsius or fahrenheit)
    #[arg(long, value_name = "UNIT", num_args = 0..=1, default_missing_value = DEFAULT_TEMPERATURE_UNIT)]
    pub temp: Option<String>,

    /// Show the pressure
    #[arg(long)]
    pub pressure: bool,

    /// Show the cloud cover
    #[arg(long)]
    pub cloud: bool,

    /// Show the humidity
    #[arg(long)]
    pub humidity: bool,

    /// Show wind speed and degree
    #[arg(long)]
    pub wind: bool,

    /// Show the sunset time
    #[arg(long)]
    pub sunset: bool,

    /// Show the sunrise time
    #[arg(long)]
    pub sunrise: bool,
}

impl Cli {
    /// Parse the process arguments, accepting the single-dash flag style.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn request_options(&self) -> RequestOptions {
        let flags = [
            (Field::Time, self.time),
            (Field::Temperature, self.temp.as_deref().is_some_and(|unit| !unit.is_empty())),
            (Field::Pressure, self.pressure),
            (Field::Cloud, self.cloud),
            (Field::Humidity, self.humidity),
            (Field::Wind, self.wind),
            (Field::Sunset, self.sunset),
            (Field::Sunrise, self.sunrise),
        ];

        RequestOptions {
            api_key: self.api.clone(),
            city: self.city.clone(),
            city_id: self.cid.clone(),
            coordinates: self.gc.clone(),
            postal_code: self.z.clone(),
            fields: flags.into_iter().filter(|(_, on)| *on).map(|(field, _)| field).collect(),
            temperature_unit: self.temp.clone(),
            help: self.help,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let client = OpenWeatherClient::new(&config)?;
        let options = self.request_options();

        match forecast_core::run(&options, &client).await {
            Ok(Outcome::Usage) => Self::command().print_help()?,
            Ok(Outcome::Report(report)) => println!("{report}"),
            Err(err) => {
                tracing::debug!(error = ?err, "request failed");
                println!("{err}");
            }
        }

        Ok(())
    }
}

/// Rewrite `-name` and `-name=value` into `--name` form for known flags.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let rewritten = arg.to_str().filter(|s| is_single_dash_flag(s)).map(|s| format!("-{s}"));
            rewritten.map_or(arg, OsString::from)
        })
        .collect()
}

fn is_single_dash_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
