//! Lint for unexported methods.

use implgen_manifest::Manifest;

use super::{super::Lint, method_names};
use crate::pipeline::Diagnostic;

/// Lint that warns about lowercase method names.
///
/// Generated code in another package cannot implement an interface with
/// unexported methods.
pub struct UnexportedMethodLint;

impl Lint for UnexportedMethodLint {
    fn name(&self) -> &'static str {
        "unexported-method"
    }

    fn description(&self) -> &'static str {
        "Check methods are exported when generating into another package"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        let source = manifest.generate.source_package.as_deref();
        if source.is_some_and(|source| source == manifest.generate.output_package()) {
            return;
        }

        for (interface, _) in manifest.selected_interfaces() {
            for method in method_names(manifest, interface) {
                if method.starts_with(|c: char| c.is_uppercase()) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "method '{}' of '{}' is unexported and cannot be implemented from another package",
                            method, interface
                        ),
                    )
                    .from_lint(self.name())
                    .at(format!("interfaces.{}.methods.{}", interface, method)),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexported_method() {
        let manifest: Manifest = r#"
[interfaces.Service.methods.Get]
[interfaces.Service.methods.reset]
"#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        UnexportedMethodLint.check(&manifest, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("interfaces.Service.methods.reset")
        );
    }

    #[test]
    fn test_same_package_allows_unexported() {
        let manifest: Manifest = r#"
[generate]
source_package = "example.com/app"
self_package = "example.com/app"

[interfaces.Service.methods.reset]
"#
        .parse()
        .unwrap();

        let mut diagnostics = Vec::new();
        UnexportedMethodLint.check(&manifest, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
