//! Storefront CLI

use std::process;

use tracing::error;

use crate::cli::Cli;

mod cli;

fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = cli::logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, stderr is all that is left"
        )]
        {
            eprintln!("failed to initialise logging: {error}");
        }
    }

    if let Err(error) = cli.run() {
        error!("{error}");

        process::exit(1);
    }
}
