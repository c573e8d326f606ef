//! Lint for methods that shadow the mock's `EXPECT` accessor.

use implgen_manifest::{ArtifactKind, Manifest};

use super::{super::Lint, method_names};
use crate::pipeline::Diagnostic;

/// Name of the accessor every mock declares for its recorder.
const RECORDER_ACCESSOR: &str = "EXPECT";

/// Lint that warns when an interface method is named `EXPECT`.
///
/// The mock declares `EXPECT()` itself, so the generated file would not
/// compile.
pub struct RecorderCollisionLint;

impl Lint for RecorderCollisionLint {
    fn name(&self) -> &'static str {
        "recorder-collision"
    }

    fn description(&self) -> &'static str {
        "Check no mocked method collides with the EXPECT accessor"
    }

    fn check(&self, manifest: &Manifest, diagnostics: &mut Vec<Diagnostic>) {
        if manifest.generate.mode != ArtifactKind::Mock {
            return;
        }

        for (interface, _) in manifest.selected_interfaces() {
            if method_names(manifest, interface).contains(&RECORDER_ACCESSOR) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "method '{}' of '{}' collides with the generated {}() accessor",
                            RECORDER_ACCESSOR, interface, RECORDER_ACCESSOR
                        ),
                    )
                    .from_lint(self.name())
                    .at(format!("interfaces.{}", interface)),
                );
            }
        }
    }
}
