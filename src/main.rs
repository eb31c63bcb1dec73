mod app;
mod cli;
mod config;
mod error;
mod http;

#[cfg(test)]
mod test_server;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const DEFAULT_LOG_DIRECTIVE: &str = "clearhistory=info";

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    if let Err(err) = init_logging() {
        eprintln!("failed to initialise logging: {err:#}");
        return ExitCode::FAILURE;
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            exit_code_for(&err)
        }
    };
    ExitCode::from(code)
}

fn run(cli: &cli::Cli) -> Result<u8> {
    let config = Config::load(cli)?;
    let report = app::run(&config)?;
    if !report.is_clean() {
        error!(
            failed = report.failed.len(),
            attempted = report.attempted(),
            "some history items could not be deleted"
        );
    }
    Ok(report.exit_code())
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<error::Error>()
        .map(error::Error::exit_code)
        .unwrap_or(1)
}

// RUST_LOG replaces the default directive entirely when it is set and valid.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

fn init_logging() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
