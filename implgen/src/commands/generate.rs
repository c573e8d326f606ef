use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use implgen_manifest::{ArtifactKind, ImplgenToml, Manifest, TraceStrategy};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to implgen.toml (defaults to ./implgen.toml)
    #[arg(short, long, default_value = "implgen.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Print the generated file instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Command-line values taking precedence over the `[generate]` and
/// `[names]` tables.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Artifact family: mock, trace or metrics
    #[arg(long)]
    pub mode: Option<ArtifactKind>,

    /// Span strategy for trace mode: context-aware or unconditional
    #[arg(long)]
    pub trace_strategy: Option<TraceStrategy>,

    /// Output file, relative to the manifest's directory
    #[arg(short, long)]
    pub destination: Option<PathBuf>,

    /// Package name of the generated file
    #[arg(short, long)]
    pub package: Option<String>,

    /// Generated type name for an interface, as Interface=TypeName
    #[arg(long = "name", value_name = "INTERFACE=TYPE", value_parser = parse_name_override)]
    pub names: Vec<(String, String)>,
}

impl Overrides {
    pub fn apply(&self, manifest: &mut Manifest) {
        let config = &mut manifest.generate;
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(strategy) = self.trace_strategy {
            config.trace_strategy = strategy;
        }
        if let Some(destination) = &self.destination {
            config.destination = Some(destination.clone());
        }
        if let Some(package) = &self.package {
            config.package = Some(package.clone());
        }
        for (interface, type_name) in &self.names {
            manifest.names.insert(interface.clone(), type_name.clone());
        }
    }
}

fn parse_name_override(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((interface, type_name)) if !interface.is_empty() && !type_name.is_empty() => {
            Ok((interface.trim().to_string(), type_name.trim().to_string()))
        }
        _ => Err(format!("expected INTERFACE=TYPE, got '{}'", s)),
    }
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let implgen_toml = ImplgenToml::open(&self.config).unwrap_or_exit();
        let base_dir = implgen_toml.dir().to_path_buf();

        let mut manifest = implgen_toml.into_manifest();
        self.overrides.apply(&mut manifest);

        let report = ops::generate(manifest, &base_dir, self.dry_run)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
