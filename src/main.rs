//! Orgwatch CLI entrypoint for listing and subscribing to an organisation's
//! repositories.

use std::io::{self, Write};
use std::process::ExitCode;

use orgwatch::{OrgwatchConfig, WatchError};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "ORGWATCH_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), WatchError> {
    let config = load_config()?;
    cli::run(&config).await
}

/// Installs a stderr log subscriber filtered by `ORGWATCH_LOG`, defaulting
/// to warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`WatchError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<OrgwatchConfig, WatchError> {
    OrgwatchConfig::load().map_err(|error| WatchError::Configuration {
        message: error.to_string(),
    })
}
