//! Package qualification table.

use std::collections::BTreeMap;

/// Maps import paths to the local alias used to qualify their types.
///
/// Iteration is sorted by import path so rendered import blocks are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMap {
    aliases: BTreeMap<String, String>,
}

impl PackageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the alias for an import path, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<String>, alias: impl Into<String>) {
        self.aliases.insert(path.into(), alias.into());
    }

    /// The registered alias for an import path.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    /// The alias to qualify types from `path` with.
    ///
    /// Falls back to [`default_package_name`] for unregistered paths.
    pub fn qualifier(&self, path: &str) -> String {
        match self.alias(path) {
            Some(alias) => alias.to_string(),
            None => default_package_name(path),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.aliases.contains_key(path)
    }

    /// Iterate over `(path, alias)` pairs sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }
}

/// Derive the conventional package name for an import path.
///
/// Uses the last path element, skipping a trailing major-version element
/// (`example.com/kit/v2` → `kit`) and a `.vN` suffix (`gopkg.in/yaml.v3` →
/// `yaml`). Characters that are invalid in identifiers become `_`.
pub fn default_package_name(path: &str) -> String {
    let mut elements = path.rsplit('/').filter(|e| !e.is_empty());
    let mut last = elements.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(previous) = elements.next()
    {
        last = previous;
    }
    if let Some((base, suffix)) = last.rsplit_once('.')
        && is_major_version(suffix)
    {
        last = base;
    }
    sanitize(last)
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
