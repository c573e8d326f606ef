mod check;
mod completions;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for implgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "implgen")]
#[command(version)]
#[command(about = "Generate Go mocks and decorators from interface manifests")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go code from implgen.toml
    Generate(GenerateCommand),

    /// Validate implgen.toml without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use implgen_manifest::{ArtifactKind, TraceStrategy};

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_overrides() {
        let cli = Cli::try_parse_from([
            "implgen",
            "generate",
            "-c",
            "api/implgen.toml",
            "--mode",
            "trace",
            "--trace-strategy",
            "unconditional",
            "--name",
            "Service=TracedAPI",
            "--name",
            "Store=TracedStore",
            "--dry-run",
        ])
        .unwrap();

        let Commands::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.config.to_str(), Some("api/implgen.toml"));
        assert_eq!(cmd.overrides.mode, Some(ArtifactKind::Trace));
        assert_eq!(cmd.overrides.trace_strategy, Some(TraceStrategy::Unconditional));
        assert_eq!(
            cmd.overrides.names,
            vec![
                ("Service".to_string(), "TracedAPI".to_string()),
                ("Store".to_string(), "TracedStore".to_string()),
            ]
        );
        assert!(cmd.dry_run);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(Cli::try_parse_from(["implgen", "generate", "--mode", "stub"]).is_err());
        assert!(Cli::try_parse_from(["implgen", "generate", "--name", "Service"]).is_err());
    }

    #[test]
    fn test_parse_check_json() {
        let cli = Cli::try_parse_from(["implgen", "check", "--json"]).unwrap();
        let Commands::Check(cmd) = cli.command else {
            panic!("expected check");
        };
        assert!(cmd.json);
        assert_eq!(cmd.config.to_str(), Some("implgen.toml"));
    }
}
