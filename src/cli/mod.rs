//! Command line interface.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use serde::de::DeserializeOwned;
use storefront::{pricing::PricingError, timestamps};
use thiserror::Error;

use crate::cli::logging::LoggingConfig;

mod accounts;
mod discounts;
mod endpoints;
pub(crate) mod logging;
mod pricing;
mod render;
mod statuses;
mod tier;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront admin calculations", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Progress towards the next membership tier
    Tier(tier::TierArgs),

    /// Tier progress of exported loyalty accounts
    Accounts(accounts::AccountsArgs),

    /// Validity of exported discounts
    Discounts(discounts::DiscountsArgs),

    /// Discounted prices of an exported catalog
    Pricing(pricing::PricingArgs),

    /// Display names, colors and icons of backend status values
    Statuses(statuses::StatusesArgs),

    /// Resolved service URLs and authentication state
    Endpoints(endpoints::EndpointsArgs),
}

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl Cli {
    /// Loads `.env` and parses the command line.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) fn run(self) -> Result<(), CliError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Tier(args) => tier::run(&args, &mut out),
            Commands::Accounts(args) => accounts::run(&args, &mut out),
            Commands::Discounts(args) => discounts::run(&args, &mut out),
            Commands::Pricing(args) => pricing::run(&args, &mut out),
            Commands::Statuses(args) => statuses::run(&args, &mut out),
            Commands::Endpoints(args) => endpoints::run(&args, &mut out),
        }?;

        out.flush().map_err(CliError::Output)
    }
}

/// Reads a JSON export from disk.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// `value_parser` for `--at` style timestamp arguments.
fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    timestamps::parse(value).map_err(|error| format!("invalid timestamp `{value}`: {error}"))
}

/// `--at` if given, otherwise the current time.
fn at_or_now(at: Option<Timestamp>) -> Timestamp {
    at.unwrap_or_else(Timestamp::now)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn timestamp_arguments_accept_bare_dates() {
        assert!(parse_timestamp("2026-03-01").is_ok());
        assert!(parse_timestamp("next tuesday").is_err());
    }

    #[test]
    fn tier_command_parses() {
        let cli = Cli::try_parse_from(["storefront", "tier", "--points", "3000", "--tier", "gold"]);

        assert!(matches!(
            cli.map(|cli| cli.command),
            Ok(Commands::Tier(_))
        ));
    }
}
