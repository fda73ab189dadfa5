use crate::{RequestOptions, WeatherError, WeatherService, location, report};

/// Successful end state of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The concatenated weather report.
    Report(String),
    /// Usage text should be shown; there is nothing else to print.
    Usage,
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Report(report) => report,
            Outcome::Usage => "",
        }
    }
}

/// Run one request end to end. Every failure comes back as a value.
pub async fn run(
    options: &RequestOptions,
    service: &dyn WeatherService,
) -> Result<Outcome, WeatherError> {
    match (options.api_key(), options.help) {
        (Some(_), true) => Err(WeatherError::HelpAndDataConflict),
        (Some(api_key), false) => {
            service.check_api_key(api_key).await?;

            let location = location::resolve(options)?;
            tracing::debug!(?location, "location resolved");

            let record = service.current(api_key, &location).await?;
            let report = report::render(&record, options)?;

            Ok(Outcome::Report(report))
        }
        (None, true) => Ok(Outcome::Usage),
        (None, false) => Err(WeatherError::NoArgumentsProvided),
    }
}
