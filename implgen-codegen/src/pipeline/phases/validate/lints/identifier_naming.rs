//! Lint for names that end up as Go identifiers.

use implgen_manifest::{Manifest, validate_identifier};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that rejects generated type names and package names that Go
/// would not accept.
///
/// Interface, method and parameter names are checked while parsing; this
/// covers values that can also come from the command line.
pub struct IdentifierNamingLint;

impl Lint for IdentifierNamingLint {
    fn name(&self) -> &'static str {
        "identifier-naming"
    }

    fn description(&self) -> &'static str {
        "Check generated type names and the package name are valid Go identifiers"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let package = manifest.generate.package_name();
        if let Some(reason) = validate_identifier(&package) {
            diagnostics.push(
                Diagnostic::error(
                    "validate",
                    format!("package name '{}' is invalid: {}", package, reason),
                )
                .from_lint(self.name())
                .at("generate.package"),
            );
        }

        for (interface, type_name) in &manifest.names {
            if let Some(reason) = validate_identifier(type_name) {
                diagnostics.push(
                    Diagnostic::error(
                        "validate",
                        format!(
                            "type name '{}' for '{}' is invalid: {}",
                            type_name, interface, reason
                        ),
                    )
                    .from_lint(self.name())
                    .at(format!("names.{}", interface)),
                );
            }
        }
    }
}
