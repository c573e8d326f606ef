//! Lint for interfaces without methods.

use implgen_manifest::Manifest;

use super::{super::Lint, method_names};
use crate::pipeline::Diagnostic;

/// Lint that notes interfaces with no methods, even after embedding.
pub struct EmptyInterfaceLint;

impl Lint for EmptyInterfaceLint {
    fn name(&self) -> &'static str {
        "empty-interface"
    }

    fn description(&self) -> &'static str {
        "Note interfaces that declare no methods"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        for (interface, _) in manifest.selected_interfaces() {
            if method_names(manifest, interface).is_empty() {
                diagnostics.push(
                    Diagnostic::info(
                        "validate",
                        format!("interface '{}' has no methods", interface),
                    )
                    .from_lint(self.name())
                    .at(format!("interfaces.{}", interface)),
                );
            }
        }
    }
}
