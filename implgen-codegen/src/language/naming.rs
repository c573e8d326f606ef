//! Naming conventions and identifier allocation.

use std::collections::HashSet;

/// Language-specific naming rules.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Words that cannot be used as identifiers
    pub reserved_words: &'static [&'static str],
}

/// Go naming conventions.
pub const GO_NAMING: NamingConvention = NamingConvention {
    reserved_words: implgen_manifest::GO_KEYWORDS,
};

/// Hands out identifiers that are unique within one generated scope.
///
/// `allocate("ret")` returns `ret` the first time, then `ret2`, `ret3`, ...
/// Names are never released.
#[derive(Debug, Clone, Default)]
pub struct IdentifierAllocator {
    taken: HashSet<String>,
}

impl IdentifierAllocator {
    /// Create an allocator with `taken` already in use.
    pub fn new<I, S>(taken: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: taken.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an allocator that never hands out the convention's reserved words.
    pub fn for_convention(naming: &NamingConvention) -> Self {
        Self::new(naming.reserved_words.iter().copied())
    }

    /// Return `preferred` if free, else the first free `preferred<N>` for N ≥ 2.
    pub fn allocate(&mut self, preferred: &str) -> String {
        if self.taken.insert(preferred.to_string()) {
            return preferred.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{}{}", preferred, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
