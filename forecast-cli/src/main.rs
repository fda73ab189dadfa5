//! Binary crate for the `forecast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing single-dash CLI flags
//! - Logging setup
//! - Printing the report line or usage text

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cmd = cli::Cli::parse_args();
    cmd.run().await
}
