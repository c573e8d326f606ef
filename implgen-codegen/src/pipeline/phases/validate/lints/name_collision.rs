//! Lint for generated declarations that share a name.

use std::collections::HashMap;

use implgen_manifest::Manifest;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that rejects two generated declarations with the same name.
///
/// When the output package is the package declaring the interfaces, the
/// interface names themselves are taken as well.
pub struct GeneratedNameCollisionLint;

impl Lint for GeneratedNameCollisionLint {
    fn name(&self) -> &'static str {
        "generated-name-collision"
    }

    fn description(&self) -> &'static str {
        "Check generated type names are unique in the output package"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        // name -> what declares it
        let mut taken: HashMap<String, String> = HashMap::new();

        let same_package = manifest
            .generate
            .source_package
            .as_deref()
            .is_some_and(|source| source == manifest.generate.output_package());
        if same_package {
            for interface in manifest.interfaces.keys() {
                taken.insert(interface.clone(), format!("interface '{}'", interface));
            }
        }

        for (interface, _) in manifest.selected_interfaces() {
            let names = manifest.generated_names(interface);
            for name in names.declared() {
                let owner = format!("the {} for '{}'", manifest.generate.mode, interface);
                if let Some(existing) = taken.get(name) {
                    diagnostics.push(
                        Diagnostic::error(
                            "validate",
                            format!(
                                "'{}' is declared by both {} and {}",
                                name, existing, owner
                            ),
                        )
                        .from_lint(self.name())
                        .at(format!("interfaces.{}", interface)),
                    );
                } else {
                    taken.insert(name.to_string(), owner);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(src: &str) -> Vec<Diagnostic> {
        let manifest: Manifest = src.parse().unwrap();
        let mut diagnostics = Vec::new();
        GeneratedNameCollisionLint.check(&manifest, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_distinct_names() {
        assert!(check("[interfaces.Reader]\n[interfaces.Writer]\n").is_empty());
    }

    #[test]
    fn test_duplicate_override() {
        let diagnostics = check(
            r#"
[names]
Reader = "Fake"
Writer = "Fake"

[interfaces.Reader]
[interfaces.Writer]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].severity.is_error());
        assert_eq!(diagnostics[0].location.as_deref(), Some("interfaces.Writer"));
    }

    #[test]
    fn test_override_hits_recorder() {
        // MockA's recorder is MockAMockRecorder
        let diagnostics = check(
            r#"
[names]
B = "MockAMockRecorder"

[interfaces.A]
[interfaces.B]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_same_package_interface_names() {
        let diagnostics = check(
            r#"
[generate]
source_package = "example.com/app/store"
self_package = "example.com/app/store"

[names]
Store = "Cache"

[interfaces.Cache]
[interfaces.Store]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("interface 'Cache'"));
    }

    #[test]
    fn test_decorator_mirror_names() {
        let diagnostics = check(
            r#"
[generate]
mode = "metrics"

[names]
Writer = "MetricsReader"

[interfaces.Reader]
[interfaces.Writer]
"#,
        );

        assert_eq!(diagnostics.len(), 1);
    }
}
