//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{InterfaceDecl, Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext, types::ParamType};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "implgen.toml")
    }
}

impl Manifest {
    /// Parse an implgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse an implgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    tracing::debug!(
        filename,
        interfaces = manifest.interfaces.len(),
        mode = %manifest.generate.mode,
        "parsed manifest"
    );
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if let Some(package) = &manifest.generate.package {
        ctx.push("generate").validate_name(package, "package")?;
    }

    if let Some(selected) = &manifest.generate.interfaces {
        for name in selected {
            if !manifest.interfaces.contains_key(name) {
                return Err(ctx.source_context().validation_error_at(
                    format!("interface '{}' is not declared in [interfaces]", name),
                    super::validate::find_value_span(src, name),
                ));
            }
        }
    }

    let imports_ctx = ctx.push("imports");
    for (qualifier, path) in &manifest.imports {
        imports_ctx.validate_name(qualifier, "import qualifier")?;
        if path.trim().is_empty() {
            return Err(ctx.source_context().validation_error_at(
                format!("import '{}' has an empty path", qualifier),
                imports_ctx.find_span(qualifier),
            ));
        }
    }

    for (name, decl) in &manifest.interfaces {
        ctx.validate_name(name, "interface")?;
        validate_interface(manifest, name, decl, &ctx.push(name))?;
    }

    Ok(())
}

fn validate_interface(
    manifest: &Manifest,
    name: &str,
    decl: &InterfaceDecl,
    ctx: &ParseContext<'_>,
) -> Result<()> {
    let scope = manifest.type_scope(decl);

    for tp in &decl.type_params {
        ctx.validate_name(&tp.name, "type parameter")?;
        ctx.parse_type(&tp.constraint, "type parameter constraint", &scope)?;
    }

    for embed in &decl.embeds {
        if embed == name || !manifest.interfaces.contains_key(embed) {
            let message = if embed == name {
                format!("interface '{}' embeds itself", name)
            } else {
                format!(
                    "interface '{}' embeds '{}', which is not declared in [interfaces]",
                    name, embed
                )
            };
            return Err(ctx
                .source_context()
                .validation_error_at(message, super::validate::find_value_span(ctx.src(), embed)));
        }
    }

    for (method_name, method) in &decl.methods {
        ctx.validate_name(method_name, "method")?;
        let method_ctx = ctx.push(method_name);

        let last = method.params.len().saturating_sub(1);
        for (i, param) in method.params.iter().enumerate() {
            if let Some(param_name) = param.name.as_deref()
                && param_name != "_"
                && !param_name.is_empty()
            {
                method_ctx.validate_name(param_name, "parameter")?;
            }

            let parsed = method_ctx.parse_param_type(&param.ty, "parameter type", &scope)?;
            if matches!(parsed, ParamType::Variadic(_)) && i != last {
                return Err(method_ctx.type_error(
                    &param.ty,
                    "parameter type",
                    crate::types::TypeError {
                        message: "'...' is only allowed on the last parameter".into(),
                        offset: 0,
                        len: 3,
                    },
                ));
            }
        }

        for ret in &method.returns {
            method_ctx.parse_type(ret, "return type", &scope)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtifactKind, TraceStrategy};

    const SERVICE: &str = r#"
[generate]
mode = "trace"
trace_strategy = "unconditional"
source_package = "example.com/app/post"

[imports]
user = "example.com/app/user"

[interfaces.Closer.methods.Close]
returns = ["error"]

[interfaces.Service]
embeds = ["Closer"]

[interfaces.Service.methods.Create]
params = [{ name = "ctx", type = "context.Context" }, { name = "author", type = "*user.User" }, { type = "...Option" }]
returns = ["*Post", "error"]
"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest: Manifest = SERVICE.parse().unwrap();

        assert_eq!(manifest.generate.mode, ArtifactKind::Trace);
        assert_eq!(manifest.generate.trace_strategy, TraceStrategy::Unconditional);
        assert_eq!(manifest.generate.package_name(), "mock_post");
        assert!(manifest.generate.write_package_comment);

        let names: Vec<_> = manifest.interfaces.keys().collect();
        assert_eq!(names, vec!["Closer", "Service"]);
        let create = &manifest.interfaces["Service"].methods["Create"];
        assert_eq!(create.params.len(), 3);
        assert_eq!(create.params[2].name, None);
        assert_eq!(create.returns, vec!["*Post", "error"]);
    }

    #[test]
    fn test_defaults() {
        let manifest: Manifest = "".parse().unwrap();
        assert_eq!(manifest.generate.mode, ArtifactKind::Mock);
        assert_eq!(manifest.generate.trace_strategy, TraceStrategy::ContextAware);
        assert_eq!(manifest.generate.package_name(), "mocks");
        assert_eq!(manifest.generate.output_package(), "");
        assert!(manifest.interfaces.is_empty());
    }

    #[test]
    fn test_selected_interfaces() {
        let src = format!("{}\n", SERVICE).replace(
            "[imports]",
            "interfaces = [\"Service\"]\n\n[imports]",
        );
        let manifest: Manifest = src.parse().unwrap();
        let selected: Vec<_> = manifest
            .selected_interfaces()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(selected, vec!["Service"]);
    }

    #[test]
    fn test_unknown_selected_interface() {
        let err = "[generate]\ninterfaces = [\"Missing\"]\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(err.to_string().contains("'Missing' is not declared"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = "[generate]\nmodes = \"mock\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let err = "[generate]\nmode = \"stub\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_keyword_method_name() {
        let src = "[interfaces.Service.methods.func]\n";
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::ReservedKeyword { name, context, .. } => {
                assert_eq!(name, "func");
                assert_eq!(context, "method in 'Service'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_parameter_name() {
        let src = r#"
[interfaces.Service.methods.Get]
params = [{ name = "user-id", type = "int" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_blank_parameter_name_allowed() {
        let src = r#"
[interfaces.Service.methods.Get]
params = [{ name = "_", type = "int" }]
"#;
        assert!(src.parse::<Manifest>().is_ok());
    }

    #[test]
    fn test_invalid_type_reports_span() {
        let src = r#"
[interfaces.Service.methods.Get]
returns = ["map[string"]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::InvalidType {
                ty, span, location, ..
            } => {
                assert_eq!(ty, "map[string");
                assert_eq!(location, "return type in 'Service.Get'");
                let span = span.unwrap();
                assert_eq!(&src[span.offset()..span.offset() + 1], "\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_variadic_must_be_last() {
        let src = r#"
[interfaces.Logger.methods.Log]
params = [{ name = "args", type = "...any" }, { name = "level", type = "int" }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::InvalidType { reason, .. } => assert!(reason.contains("last parameter")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_embed() {
        let src = "[interfaces.Service]\nembeds = [\"Reader\"]\n";
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("'Reader', which is not declared"));
    }

    #[test]
    fn test_self_embed() {
        let src = "[interfaces.Service]\nembeds = [\"Service\"]\n";
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(err.to_string().contains("embeds itself"));
    }

    #[test]
    fn test_type_param_scope() {
        let src = r#"
[interfaces.Store]
type_params = [{ name = "K", constraint = "comparable" }, { name = "V" }]

[interfaces.Store.methods.Get]
params = [{ name = "key", type = "K" }]
returns = ["V", "bool"]
"#;
        let manifest: Manifest = src.parse().unwrap();
        let store = &manifest.interfaces["Store"];
        assert_eq!(store.type_params[1].constraint, "any");
    }
}
