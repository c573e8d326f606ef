use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use implgen_manifest::ImplgenToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to implgen.toml (defaults to ./implgen.toml)
    #[arg(short, long, default_value = "implgen.toml")]
    pub config: PathBuf,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let implgen_toml = ImplgenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(implgen_toml.manifest(), &self.config);

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .wrap_err("Failed to serialize diagnostics")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
