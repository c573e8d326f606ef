//! Built-in lints.

mod empty_interface;
mod identifier_naming;
mod name_collision;
mod recorder_collision;
mod unexported_method;
mod unknown_override;

use std::collections::HashSet;

pub use empty_interface::EmptyInterfaceLint;
pub use identifier_naming::IdentifierNamingLint;
use implgen_manifest::Manifest;
pub use name_collision::GeneratedNameCollisionLint;
pub use recorder_collision::RecorderCollisionLint;
pub use unexported_method::UnexportedMethodLint;
pub use unknown_override::UnknownOverrideLint;

/// Method names of `interface`, including embedded ones, without duplicates.
///
/// Own methods come first, then each embed depth-first. Cycles are skipped;
/// the lower phase reports them.
pub(crate) fn method_names<'a>(manifest: &'a Manifest, interface: &'a str) -> Vec<&'a str> {
    let mut names = Vec::new();
    let mut visited = HashSet::new();
    collect_method_names(manifest, interface, &mut visited, &mut names);
    names
}

fn collect_method_names<'a>(
    manifest: &'a Manifest,
    interface: &'a str,
    visited: &mut HashSet<&'a str>,
    names: &mut Vec<&'a str>,
) {
    if !visited.insert(interface) {
        return;
    }
    let Some(decl) = manifest.interfaces.get(interface) else {
        return;
    };
    for name in decl.methods.keys() {
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    for embed in &decl.embeds {
        collect_method_names(manifest, embed, visited, names);
    }
}
