//! Import collection and package alias assignment.

use implgen_model::{PackageMap, default_package_name};
use indexmap::IndexMap;

use crate::language::{GO_NAMING, IdentifierAllocator};

/// Tracks the import paths a generated file references.
///
/// Renderers add the runtime packages they emit code for and the packages of
/// every type they render. [`resolve`](Self::resolve) then assigns each path
/// a unique alias.
///
/// ```
/// use implgen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("github.com/go-kit/kit/metrics/prometheus");
/// imports.add_aliased("github.com/prometheus/client_golang/prometheus", "stdprometheus");
/// imports.add("example.com/app/prometheus");
///
/// let packages = imports.resolve("");
/// assert_eq!(packages.alias("example.com/app/prometheus"), Some("prometheus"));
/// assert_eq!(packages.alias("github.com/go-kit/kit/metrics/prometheus"), Some("prometheus2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Import path -> preferred alias, if any
    imports: IndexMap<String, Option<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import path using its default package name.
    pub fn add(&mut self, path: &str) {
        self.imports.entry(path.to_string()).or_insert(None);
    }

    /// Add an import path with a preferred alias.
    pub fn add_aliased(&mut self, path: &str, alias: &str) {
        self.imports
            .insert(path.to_string(), Some(alias.to_string()));
    }

    /// Add every path from an iterator.
    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add(path.as_ref());
        }
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (path, alias) in &other.imports {
            match alias {
                Some(alias) => self.add_aliased(path, alias),
                None => self.add(path),
            }
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Assign aliases and build the qualification table.
    ///
    /// `self_package` (the generated file's own import path) is never
    /// imported. Paths with a preferred alias are assigned first, then the
    /// rest, each group in path order, so the result does not depend on the
    /// order paths were added. Collisions and Go keywords get a numeric
    /// suffix.
    pub fn resolve(&self, self_package: &str) -> PackageMap {
        let mut paths: Vec<(&String, &Option<String>)> = self
            .imports
            .iter()
            .filter(|(path, _)| self_package.is_empty() || path.as_str() != self_package)
            .collect();
        paths.sort_by(|(a_path, a_alias), (b_path, b_alias)| {
            a_alias
                .is_none()
                .cmp(&b_alias.is_none())
                .then_with(|| a_path.cmp(b_path))
        });

        let mut aliases = IdentifierAllocator::for_convention(&GO_NAMING);
        let mut packages = PackageMap::new();
        for (path, preferred) in paths {
            let preferred = preferred
                .clone()
                .unwrap_or_else(|| default_package_name(path));
            let alias = aliases.allocate(&preferred);
            tracing::trace!(%path, %alias, "assigned import alias");
            packages.insert(path.as_str(), alias);
        }
        packages
    }
}
