//! Interface, method and parameter descriptions.

use serde::{Deserialize, Serialize};

use crate::TypeExpr;

/// An interface to generate artifacts for.
///
/// Embedded interfaces are already expanded into `methods`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, unique within a generation unit.
    pub name: String,
    /// Import path of the package declaring the interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Type parameters in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParam>,
    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            type_params: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Methods sorted by name.
    ///
    /// Generated output depends only on method names, never on the
    /// declaration order of the model.
    pub fn sorted_methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.iter().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }

    /// The interface itself as a type, instantiated with its own type parameters.
    pub fn as_type(&self) -> TypeExpr {
        TypeExpr::Named {
            package: self.package.clone(),
            name: self.name.clone(),
            type_args: self
                .type_params
                .iter()
                .map(|tp| TypeExpr::type_param(&tp.name))
                .collect(),
        }
    }
}

/// A type parameter with its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: TypeExpr,
}

impl TypeParam {
    pub fn new(name: impl Into<String>, constraint: TypeExpr) -> Self {
        Self {
            name: name.into(),
            constraint,
        }
    }
}

/// A method of an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// Fixed (non-variadic) parameters.
    #[serde(default)]
    pub params: Vec<Parameter>,
    /// Trailing variadic parameter; `ty` is the element type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variadic: Option<Parameter>,
    #[serde(default)]
    pub returns: Vec<TypeExpr>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            variadic: None,
            returns: Vec::new(),
        }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn variadic(mut self, param: Parameter) -> Self {
        self.variadic = Some(param);
        self
    }

    pub fn returns(mut self, ty: TypeExpr) -> Self {
        self.returns.push(ty);
        self
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Number of parameters, counting the variadic one.
    pub fn arity(&self) -> usize {
        self.params.len() + usize::from(self.variadic.is_some())
    }

    /// Returns true if the first fixed parameter is a `context.Context`.
    pub fn takes_context(&self) -> bool {
        self.params
            .first()
            .is_some_and(|p| p.ty.is_cancellation_context())
    }

    /// Index of the error-like return value.
    ///
    /// When several returns are error-like the last one wins, matching the
    /// conventional `(T, error)` shape.
    pub fn error_index(&self) -> Option<usize> {
        self.returns.iter().rposition(TypeExpr::is_error_like)
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name suggested by the front end, if it could recover one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }

    /// The suggested name, ignoring empty and blank (`_`) names.
    pub fn suggested_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty() && *name != "_")
    }
}
