//! Validation context and identifier rules for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{
    Result,
    error::SourceContext,
    types::{ParamType, TypeError, TypeScope, parse_param_type, parse_type},
};

/// Parsing and validation context that carries source information.
///
/// Holds the source content, filename, and the current path through the
/// manifest (e.g. `interfaces.Service.methods.Create`) so nested checks can
/// report where they failed.
///
/// ```ignore
/// let ctx = ParseContext::new(src, "implgen.toml");
/// ctx.validate_name("Service", "interface")?;
///
/// let nested = ctx.push("Service").push("Create");
/// nested.validate_name("ctx", "parameter")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// The current path joined with dots.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe `kind` at the current path, e.g. "parameter in 'Service.Create'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name)
    }

    /// Validate that a name is a usable Go identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_go_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Parse a type string, reporting failures against the manifest source.
    pub fn parse_type(&self, ty: &str, kind: &str, scope: &TypeScope<'_>) -> Result<implgen_model::TypeExpr> {
        parse_type(ty, scope).map_err(|e| self.type_error(ty, kind, e))
    }

    /// Parse a parameter type string, which may be variadic.
    pub fn parse_param_type(&self, ty: &str, kind: &str, scope: &TypeScope<'_>) -> Result<ParamType> {
        parse_param_type(ty, scope).map_err(|e| self.type_error(ty, kind, e))
    }

    /// Report `reason` against a type string.
    pub fn type_error(&self, ty: &str, kind: &str, error: TypeError) -> Box<crate::Error> {
        let span = find_value_span(self.source.src(), ty)
            .map(|base| SourceSpan::from((base.offset() + error.offset, error.len.max(1))));
        self.source
            .invalid_type_error(ty, self.context_for(kind), error.message, span)
    }
}

/// Go keywords, which cannot be used as identifiers.
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Check that `name` is a Go identifier.
///
/// Returns `None` if valid, `Some(reason)` otherwise. The blank identifier
/// is rejected since every declared name here must be referable.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }

    if name == "_" {
        return Some("the blank identifier '_' cannot be used here");
    }

    if is_go_keyword(name) {
        return Some("name is a Go reserved keyword");
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Find the span of a name used as a TOML key.
///
/// Searches for `.name]`, `.name.`, `[name]`, and inline `{ name =` forms.
/// Returns `None` rather than guess when nothing matches.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let header_patterns = [
        (format!(".{}]", name), 1usize),
        (format!(".{}.", name), 1usize),
        (format!("[{}]", name), 1usize),
        (format!("\n{} =", name), 1usize),
        (format!("\n{}=", name), 1usize),
        (format!("name = \"{}\"", name), 8usize),
        (format!("name = '{}'", name), 8usize),
        (format!("{{ {} =", name), 2usize),
        (format!(", {} =", name), 2usize),
    ];

    header_patterns.iter().find_map(|(pattern, skip)| {
        src.find(pattern.as_str())
            .map(|pos| SourceSpan::from((pos + skip, name.len())))
    })
}

/// Find the span of a quoted string value (without its quotes).
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    [format!("\"{}\"", value), format!("'{}'", value)]
        .iter()
        .find_map(|pattern| src.find(pattern.as_str()))
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}
