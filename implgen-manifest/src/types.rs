//! Go type strings.
//!
//! Method signatures in `implgen.toml` spell their types in Go syntax. This
//! module turns those strings into [`TypeExpr`] values, resolving package
//! qualifiers through the manifest's `[imports]` table and bare names
//! through the interface's type parameters and the source package.
//!
//! Supported forms:
//!
//! ```text
//! Type      = "*" Type | "[" "]" Type | "[" int "]" Type
//!           | "map" "[" Type "]" Type
//!           | "chan" Type | "chan" "<-" Type | "<-" "chan" Type
//!           | "func" Signature
//!           | "interface" "{" "}" | "struct" "{" "}"
//!           | "(" Type ")"
//!           | [ident "."] ident [ "[" Type { "," Type } [","] "]" ]
//! Signature = Params [ Type | Params ]
//! Params    = "(" [ Param { "," Param } [","] ] ")"
//! Param     = [ ident { "," ident } ] [ "..." ] Type
//! ```
//!
//! Parameter names are accepted and dropped, so `func(a, b int) error` is
//! the same type as `func(int, int) error`.

use std::fmt;

use implgen_model::{ChanDir, TypeExpr};
use indexmap::IndexMap;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, digit1, multispace0},
    combinator::{cut, map, opt, peek, recognize, verify},
    error::{ContextError, ErrorKind, ParseError, context},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
};
use nom_locate::LocatedSpan;

/// Predeclared Go type names.
const PREDECLARED: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const VARIADIC_LAST: &str = "'...' is only allowed on the last parameter";

/// Names visible to a type string.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    imports: &'a IndexMap<String, String>,
    source_package: Option<&'a str>,
    type_params: Vec<&'a str>,
}

impl<'a> TypeScope<'a> {
    pub fn new(imports: &'a IndexMap<String, String>, source_package: Option<&'a str>) -> Self {
        Self {
            imports,
            source_package,
            type_params: Vec::new(),
        }
    }

    /// Bring type parameter names into scope.
    pub fn with_type_params(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.type_params.extend(names);
        self
    }

    fn resolve_package(&self, qualifier: &str) -> String {
        self.imports
            .get(qualifier)
            .cloned()
            .unwrap_or_else(|| qualifier.to_string())
    }
}

/// A type string that failed to parse.
///
/// `offset` and `len` locate the offending text inside the type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub message: String,
    pub offset: usize,
    pub len: usize,
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for TypeError {}

/// The type of a method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Fixed(TypeExpr),
    /// `...T`, holding the element type `T`.
    Variadic(TypeExpr),
}

/// Parse a Go type string.
pub fn parse_type(src: &str, scope: &TypeScope<'_>) -> Result<TypeExpr, TypeError> {
    finish(src, |i| go_type(scope, i))
}

/// Parse a Go parameter type string, which may be variadic (`...T`).
pub fn parse_param_type(src: &str, scope: &TypeScope<'_>) -> Result<ParamType, TypeError> {
    finish(src, |i| {
        let (i, ellipsis) = opt(sym("..."))(i)?;
        let (i, ty) = go_type(scope, i)?;
        Ok((
            i,
            match ellipsis {
                Some(_) => ParamType::Variadic(ty),
                None => ParamType::Fixed(ty),
            },
        ))
    })
}

type Span<'s> = LocatedSpan<&'s str>;

type PResult<'s, T> = IResult<Span<'s>, T, SyntaxError>;

/// Parser error positioned in the type string.
///
/// `message` stays empty until a `context` names what was expected, so the
/// innermost context wins.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxError {
    message: Option<String>,
    offset: usize,
    len: usize,
}

impl SyntaxError {
    fn new(at: Span<'_>, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::unlabeled(at)
        }
    }

    fn unlabeled(at: Span<'_>) -> Self {
        Self {
            message: None,
            offset: at.location_offset(),
            len: token_len(at.fragment()),
        }
    }
}

impl<'s> ParseError<Span<'s>> for SyntaxError {
    fn from_error_kind(input: Span<'s>, _kind: ErrorKind) -> Self {
        Self::unlabeled(input)
    }

    fn append(_input: Span<'s>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'s> ContextError<Span<'s>> for SyntaxError {
    fn add_context(_input: Span<'s>, ctx: &'static str, mut other: Self) -> Self {
        if other.message.is_none() {
            other.message = Some(format!("expected {}", ctx));
        }
        other
    }
}

impl From<SyntaxError> for TypeError {
    fn from(err: SyntaxError) -> Self {
        Self {
            message: err.message.unwrap_or_else(|| "expected a type".to_string()),
            offset: err.offset,
            len: err.len,
        }
    }
}

/// Length of the token starting `rest`, used to size error spans.
fn token_len(rest: &str) -> usize {
    let word = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    if word > 0 {
        return word;
    }
    ["...", "<-"]
        .iter()
        .find(|op| rest.starts_with(**op))
        .map(|op| op.len())
        .unwrap_or_else(|| rest.chars().next().map_or(0, char::len_utf8))
}

fn finish<'s, O>(
    src: &'s str,
    mut parser: impl FnMut(Span<'s>) -> PResult<'s, O>,
) -> Result<O, TypeError> {
    let result = parser(Span::new(src)).and_then(|(rest, out)| {
        let (rest, _) = space(rest)?;
        if rest.fragment().is_empty() {
            Ok(out)
        } else {
            Err(nom::Err::Failure(SyntaxError::new(rest, "unexpected trailing input")))
        }
    });
    match result {
        Ok(out) => Ok(out),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => Err(err.into()),
        Err(nom::Err::Incomplete(_)) => Err(TypeError {
            message: "unexpected end of type".to_string(),
            offset: src.len(),
            len: 0,
        }),
    }
}

fn space(i: Span<'_>) -> PResult<'_, Span<'_>> {
    multispace0(i)
}

fn sym<'s>(token: &'static str) -> impl FnMut(Span<'s>) -> PResult<'s, Span<'s>> {
    preceded(multispace0, tag(token))
}

fn ident(i: Span<'_>) -> PResult<'_, Span<'_>> {
    preceded(
        multispace0,
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
    )(i)
}

fn keyword<'s>(word: &'static str) -> impl FnMut(Span<'s>) -> PResult<'s, Span<'s>> {
    verify(ident, move |name: &Span<'s>| *name.fragment() == word)
}

fn is_type_keyword(name: &str) -> bool {
    matches!(name, "map" | "chan" | "func" | "interface" | "struct")
}

/// An identifier that can name a parameter.
fn param_name<'s>(i: Span<'s>) -> PResult<'s, Span<'s>> {
    verify(ident, |name: &Span<'s>| !is_type_keyword(name.fragment()))(i)
}

fn go_type<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    let (i, _) = space(i)?;
    if i.fragment().starts_with("...") {
        return Err(nom::Err::Failure(SyntaxError::new(i, VARIADIC_LAST)));
    }
    context(
        "a type",
        alt((
            map(
                preceded(sym("*"), cut(|i| go_type(scope, i))),
                TypeExpr::pointer,
            ),
            |i| slice_or_array(scope, i),
            |i| recv_chan(scope, i),
            delimited(
                sym("("),
                cut(|i| go_type(scope, i)),
                cut(context("')'", sym(")"))),
            ),
            |i| map_type(scope, i),
            |i| chan_type(scope, i),
            preceded(keyword("func"), cut(|i| signature(scope, i))),
            map(empty_literal("interface"), |_| TypeExpr::EmptyInterface),
            map(empty_literal("struct"), |_| TypeExpr::EmptyStruct),
            |i| type_name(scope, i),
        )),
    )(i)
}

fn slice_or_array<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    preceded(
        sym("["),
        cut(context(
            "']' or array length",
            alt((
                preceded(sym("]"), cut(map(|i| go_type(scope, i), TypeExpr::slice))),
                map(
                    pair(
                        terminated(array_len, cut(context("']'", sym("]")))),
                        cut(|i| go_type(scope, i)),
                    ),
                    |(len, elem)| TypeExpr::Array {
                        len,
                        elem: Box::new(elem),
                    },
                ),
            )),
        )),
    )(i)
}

fn array_len(i: Span<'_>) -> PResult<'_, u64> {
    let (rest, digits) = preceded(space, digit1)(i)?;
    match digits.fragment().parse() {
        Ok(len) => Ok((rest, len)),
        Err(_) => Err(nom::Err::Failure(SyntaxError::new(
            digits,
            "array length out of range",
        ))),
    }
}

fn recv_chan<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    preceded(
        sym("<-"),
        cut(preceded(
            context("'chan' after '<-'", keyword("chan")),
            map(|i| go_type(scope, i), |elem| TypeExpr::chan(ChanDir::Recv, elem)),
        )),
    )(i)
}

fn chan_type<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    preceded(
        keyword("chan"),
        cut(alt((
            map(preceded(sym("<-"), cut(|i| go_type(scope, i))), |elem| {
                TypeExpr::chan(ChanDir::Send, elem)
            }),
            map(|i| go_type(scope, i), |elem| TypeExpr::chan(ChanDir::Both, elem)),
        ))),
    )(i)
}

fn map_type<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    map(
        preceded(
            keyword("map"),
            cut(pair(
                delimited(
                    context("'[' after 'map'", sym("[")),
                    |i| go_type(scope, i),
                    context("']'", sym("]")),
                ),
                |i| go_type(scope, i),
            )),
        ),
        |(key, value)| TypeExpr::map(key, value),
    )(i)
}

/// `interface{}` or `struct{}`; other literals are rejected.
fn empty_literal<'s>(word: &'static str) -> impl FnMut(Span<'s>) -> PResult<'s, ()> {
    move |i| {
        let (i, _) = preceded(keyword(word), cut(context("'{'", sym("{"))))(i)?;
        let (i, _) = space(i)?;
        match sym("}")(i) {
            Ok((i, _)) => Ok((i, ())),
            Err(_) => Err(nom::Err::Failure(SyntaxError::new(
                i,
                format!("only the empty {}{{}} literal is supported", word),
            ))),
        }
    }
}

fn type_name<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    let (i, first) = ident(i)?;
    let (i, qualified) = opt(preceded(
        sym("."),
        cut(context("a type name after '.'", ident)),
    ))(i)?;
    let (i, type_args) = opt(|i| type_args(scope, i))(i)?;
    let type_args = type_args.unwrap_or_default();

    let ty = match qualified {
        Some(name) => TypeExpr::Named {
            package: Some(scope.resolve_package(first.fragment())),
            name: name.fragment().to_string(),
            type_args,
        },
        None => resolve_unqualified(scope, first, type_args)?,
    };
    Ok((i, ty))
}

/// Type parameters shadow predeclared names; anything else belongs to the
/// source package.
fn resolve_unqualified(
    scope: &TypeScope<'_>,
    name: Span<'_>,
    type_args: Vec<TypeExpr>,
) -> Result<TypeExpr, nom::Err<SyntaxError>> {
    let text = *name.fragment();
    let builtin = if scope.type_params.contains(&text) {
        Some(TypeExpr::type_param(text))
    } else if PREDECLARED.contains(&text) {
        Some(TypeExpr::predeclared(text))
    } else {
        None
    };

    match builtin {
        Some(_) if !type_args.is_empty() => Err(nom::Err::Failure(SyntaxError::new(
            name,
            format!("'{}' does not take type arguments", text),
        ))),
        Some(ty) => Ok(ty),
        None => Ok(TypeExpr::Named {
            package: scope.source_package.map(str::to_string),
            name: text.to_string(),
            type_args,
        }),
    }
}

fn type_args<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, Vec<TypeExpr>> {
    preceded(
        sym("["),
        cut(terminated(
            separated_list1(sym(","), |i| go_type(scope, i)),
            pair(
                opt(sym(",")),
                context("']' to close type arguments", sym("]")),
            ),
        )),
    )(i)
}

fn signature<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, TypeExpr> {
    let (i, mut params) = preceded(context("'(' after 'func'", sym("(")), |i| {
        param_list(scope, "')' to close parameters", i)
    })(i)?;

    let fixed = params.len().saturating_sub(1);
    if let Some(ellipsis) = params[..fixed].iter().find_map(|p| p.ellipsis) {
        return Err(nom::Err::Failure(SyntaxError::new(ellipsis, VARIADIC_LAST)));
    }
    let variadic = match params.last() {
        Some(last) if last.ellipsis.is_some() => params.pop().map(|p| Box::new(p.ty)),
        _ => None,
    };

    let (i, results) = opt(alt((
        preceded(
            sym("("),
            cut(|i| param_list(scope, "')' to close results", i)),
        ),
        map(
            |i| go_type(scope, i),
            |ty| vec![Param { ty, ellipsis: None }],
        ),
    )))(i)?;
    let results = results.unwrap_or_default();
    if let Some(ellipsis) = results.iter().find_map(|p| p.ellipsis) {
        return Err(nom::Err::Failure(SyntaxError::new(
            ellipsis,
            "'...' is not allowed in results",
        )));
    }

    Ok((
        i,
        TypeExpr::Func {
            params: params.into_iter().map(|p| p.ty).collect(),
            results: results.into_iter().map(|p| p.ty).collect(),
            variadic,
        },
    ))
}

/// One declared parameter or result after names are grouped.
struct Param<'s> {
    ty: TypeExpr,
    ellipsis: Option<Span<'s>>,
}

/// A comma-separated entry of a parameter list, before grouping.
enum Entry<'s> {
    /// A lone identifier: a name sharing the next entry's type in
    /// `(a, b int)`, otherwise a type on its own.
    Ident(Span<'s>, TypeExpr),
    Named {
        ellipsis: Option<Span<'s>>,
        ty: TypeExpr,
    },
    Unnamed {
        at: Span<'s>,
        ellipsis: Option<Span<'s>>,
        ty: TypeExpr,
    },
}

/// Entries up to and including the closing `)`.
fn param_list<'s>(
    scope: &TypeScope<'_>,
    closing: &'static str,
    i: Span<'s>,
) -> PResult<'s, Vec<Param<'s>>> {
    let (i, entries) = terminated(
        separated_list0(sym(","), |i| entry(scope, i)),
        pair(opt(sym(",")), context(closing, sym(")"))),
    )(i)?;
    let params = group_names(entries).map_err(nom::Err::Failure)?;
    Ok((i, params))
}

fn entry<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, Entry<'s>> {
    alt((
        |i| named_entry(scope, i),
        |i| lone_ident(scope, i),
        |i| unnamed_entry(scope, i),
    ))(i)
}

fn lone_ident<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, Entry<'s>> {
    let (i, name) = terminated(param_name, peek(alt((sym(","), sym(")")))))(i)?;
    let ty = resolve_unqualified(scope, name, Vec::new())?;
    Ok((i, Entry::Ident(name, ty)))
}

fn unnamed_entry<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, Entry<'s>> {
    let (at, _) = space(i)?;
    let (i, ellipsis) = opt(sym("..."))(at)?;
    let (i, ty) = go_type(scope, i)?;
    Ok((i, Entry::Unnamed { at, ellipsis, ty }))
}

/// `name T` or `name ...T`. `[` only starts a type after a name when it
/// opens a slice or array, so `List[int]` stays a generic instantiation.
fn named_entry<'s>(scope: &TypeScope<'_>, i: Span<'s>) -> PResult<'s, Entry<'s>> {
    let (i, _) = param_name(i)?;
    let (i, _) = peek(alt((
        preceded(sym("["), preceded(opt(preceded(space, digit1)), sym("]"))),
        sym("..."),
        sym("*"),
        sym("("),
        sym("<-"),
        ident,
    )))(i)?;
    let (i, ellipsis) = opt(sym("..."))(i)?;
    let (i, ty) = cut(|i| go_type(scope, i))(i)?;
    Ok((i, Entry::Named { ellipsis, ty }))
}

/// Resolve `(a, b int)` groups. Once any entry is named, lone identifiers
/// are names and every name needs a type.
fn group_names(entries: Vec<Entry<'_>>) -> Result<Vec<Param<'_>>, SyntaxError> {
    let any_named = entries.iter().any(|e| matches!(e, Entry::Named { .. }));
    if !any_named {
        return Ok(entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Ident(_, ty) => Param { ty, ellipsis: None },
                Entry::Named { ellipsis, ty } | Entry::Unnamed { ellipsis, ty, .. } => {
                    Param { ty, ellipsis }
                }
            })
            .collect());
    }

    let mut params = Vec::new();
    let mut pending = Vec::new();
    for entry in entries {
        match entry {
            Entry::Ident(name, _) => pending.push(name),
            Entry::Named { ellipsis, ty } => {
                if let Some(ellipsis) = ellipsis
                    && !pending.is_empty()
                {
                    return Err(SyntaxError::new(ellipsis, VARIADIC_LAST));
                }
                for _ in pending.drain(..) {
                    params.push(Param {
                        ty: ty.clone(),
                        ellipsis: None,
                    });
                }
                params.push(Param { ty, ellipsis });
            }
            Entry::Unnamed { at, .. } => {
                return Err(SyntaxError::new(at, "mixed named and unnamed parameters"));
            }
        }
    }
    match pending.first() {
        Some(name) => Err(SyntaxError::new(
            *name,
            format!("missing type for '{}'", name.fragment()),
        )),
        None => Ok(params),
    }
}

#[cfg(test)]
mod tests {
    use implgen_model::PackageMap;

    use super::*;

    fn imports() -> IndexMap<String, String> {
        let mut imports = IndexMap::new();
        imports.insert("user".to_string(), "example.com/app/user".to_string());
        imports.insert("kit".to_string(), "github.com/acme/kit/v2".to_string());
        imports
    }

    fn parse(src: &str) -> TypeExpr {
        let imports = imports();
        let scope = TypeScope::new(&imports, Some("example.com/app/post"))
            .with_type_params(["T", "K"]);
        parse_type(src, &scope).unwrap()
    }

    fn render(src: &str) -> String {
        parse(src).render(&PackageMap::new(), "example.com/app/post")
    }

    fn parse_err(src: &str) -> TypeError {
        let imports = imports();
        let scope = TypeScope::new(&imports, None);
        parse_type(src, &scope).unwrap_err()
    }

    #[test]
    fn test_predeclared_and_type_params() {
        assert_eq!(parse("error"), TypeExpr::error());
        assert_eq!(parse("any"), TypeExpr::predeclared("any"));
        assert_eq!(parse("T"), TypeExpr::type_param("T"));
    }

    #[test]
    fn test_bare_names_resolve_to_source_package() {
        assert_eq!(
            parse("Post"),
            TypeExpr::named(Some("example.com/app/post"), "Post")
        );
    }

    #[test]
    fn test_qualifier_resolves_through_imports() {
        assert_eq!(
            parse("*user.User"),
            TypeExpr::pointer(TypeExpr::named(Some("example.com/app/user"), "User"))
        );
        assert_eq!(
            parse("kit.Option"),
            TypeExpr::named(Some("github.com/acme/kit/v2"), "Option")
        );
    }

    #[test]
    fn test_unknown_qualifier_is_import_path() {
        assert!(parse("context.Context").is_cancellation_context());
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(render("map[string][]*Post"), "map[string][]*Post");
        assert_eq!(render("[16]byte"), "[16]byte");
        assert_eq!(render("interface{}"), "interface{}");
        assert_eq!(render("chan struct{}"), "chan struct{}");
        assert_eq!(render("Page[T]"), "Page[T]");
        assert_eq!(render("Pair[K, map[K]T,]"), "Pair[K, map[K]T]");
    }

    #[test]
    fn test_channel_directions() {
        assert_eq!(
            parse("<-chan int"),
            TypeExpr::chan(ChanDir::Recv, TypeExpr::predeclared("int"))
        );
        assert_eq!(
            parse("chan<- int"),
            TypeExpr::chan(ChanDir::Send, TypeExpr::predeclared("int"))
        );
        assert_eq!(
            parse("chan (<-chan int)"),
            TypeExpr::chan(
                ChanDir::Both,
                TypeExpr::chan(ChanDir::Recv, TypeExpr::predeclared("int"))
            )
        );
    }

    #[test]
    fn test_func_types() {
        assert_eq!(render("func()"), "func()");
        assert_eq!(render("func(int, string) error"), "func(int, string) error");
        assert_eq!(
            render("func(ctx context.Context, ids []int) (map[int]Post, error)"),
            "func(context.Context, []int) (map[int]Post, error)"
        );
        assert_eq!(
            render("func(format string, args ...any)"),
            "func(string, ...any)"
        );
        assert_eq!(render("func(Page[T]) func() int"), "func(Page[T]) func() int");
    }

    #[test]
    fn test_param_type_variadic() {
        let imports = imports();
        let scope = TypeScope::new(&imports, None);
        assert_eq!(
            parse_param_type("...string", &scope).unwrap(),
            ParamType::Variadic(TypeExpr::predeclared("string"))
        );
        assert_eq!(
            parse_param_type("[]string", &scope).unwrap(),
            ParamType::Fixed(TypeExpr::slice(TypeExpr::predeclared("string")))
        );
    }

    #[test]
    fn test_variadic_rejected_outside_parameters() {
        let err = parse_err("...int");
        assert!(err.message.contains("last parameter"));
        assert_eq!(err.offset, 0);

        let err = parse_err("func(...int, string)");
        assert!(err.message.contains("last parameter"));
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_errors_point_at_offending_token() {
        let err = parse_err("map[string");
        assert_eq!(err.message, "expected ']'");
        assert_eq!(err.offset, 10);

        let err = parse_err("int string");
        assert_eq!(err.message, "unexpected trailing input");
        assert_eq!((err.offset, err.len), (4, 6));

        let err = parse_err("*");
        assert_eq!(err.message, "expected a type");

        let err = parse_err("int[string]");
        assert!(err.message.contains("does not take type arguments"));

        let err = parse_err("interface{ Close() }");
        assert!(err.message.contains("empty interface{}"));

        let err = parse_err("user.%");
        assert_eq!(err.message, "expected a type name after '.'");
        assert_eq!((err.offset, err.len), (5, 1));

        let err = parse_err("func(int, string");
        assert_eq!(err.message, "expected ')' to close parameters");
        assert_eq!(err.offset, 16);
    }

    #[test]
    fn test_grouped_parameter_names() {
        assert_eq!(
            parse("func(a, b int) error"),
            TypeExpr::Func {
                params: vec![TypeExpr::predeclared("int"), TypeExpr::predeclared("int")],
                results: vec![TypeExpr::error()],
                variadic: None,
            }
        );
        assert_eq!(
            render("func(a, b int, rest ...string) (n int, err error)"),
            "func(int, int, ...string) (int, error)"
        );
        assert_eq!(render("func(lo, hi T) (x, y []T)"), "func(T, T) ([]T, []T)");
    }

    #[test]
    fn test_lone_names_are_types_without_named_entries() {
        assert_eq!(render("func(Post, error)"), "func(Post, error)");
        assert_eq!(render("func(List[T], int,)"), "func(List[T], int)");
    }

    #[test]
    fn test_grouped_names_errors() {
        let err = parse_err("func(a, b int, string)");
        assert_eq!(err.message, "missing type for 'string'");
        assert_eq!((err.offset, err.len), (15, 6));

        let err = parse_err("func(a int, []string)");
        assert_eq!(err.message, "mixed named and unnamed parameters");
        assert_eq!(err.offset, 12);

        let err = parse_err("func(a, b ...int)");
        assert!(err.message.contains("last parameter"));
        assert_eq!(err.offset, 10);

        let err = parse_err("func() (n ...int)");
        assert_eq!(err.message, "'...' is not allowed in results");
    }
}
