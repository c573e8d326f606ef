//! Go struct builder.

use implgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A field in a Go struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Builder for Go struct type declarations.
///
/// Field types are aligned the way gofmt aligns them.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    type_params: String,
    fields: Vec<Field>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            type_params: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn type_params(mut self, type_params: impl Into<String>) -> Self {
        self.type_params = type_params.into();
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::comment(doc));
        }

        let width = self
            .fields
            .iter()
            .map(|f| f.name.chars().count())
            .max()
            .unwrap_or(0);
        let body = self
            .fields
            .iter()
            .map(|f| CodeFragment::line(format!("{:<width$} {}", f.name, f.ty, width = width)))
            .collect();

        fragments.push(CodeFragment::braced(
            format!("type {}{} struct {{", self.name, self.type_params),
            body,
        ));
        fragments
    }
}
