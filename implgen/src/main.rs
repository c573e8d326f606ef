mod commands;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    Cli::parse().run()
}

/// Log to stderr when `IMPLGEN_LOG` is set, e.g. `IMPLGEN_LOG=implgen_codegen=debug`.
fn init_logging() {
    if let Ok(filter) = EnvFilter::try_from_env("IMPLGEN_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
