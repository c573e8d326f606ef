//! Lint for `[names]` entries that match no interface.

use implgen_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about type name overrides for interfaces that are not
/// generated.
pub struct UnknownOverrideLint;

impl Lint for UnknownOverrideLint {
    fn name(&self) -> &'static str {
        "unknown-override"
    }

    fn description(&self) -> &'static str {
        "Check [names] entries refer to generated interfaces"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let selected = manifest.selected_interfaces();
        for interface in manifest.names.keys() {
            if selected.iter().any(|(name, _)| name == interface) {
                continue;
            }
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!(
                        "type name given for '{}', but no such interface is generated",
                        interface
                    ),
                )
                .from_lint(self.name())
                .at(format!("names.{}", interface)),
            );
        }
    }
}
