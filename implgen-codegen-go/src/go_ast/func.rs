//! Go function and method builder.

use implgen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for Go functions and methods.
#[derive(Debug, Clone)]
pub struct Func {
    name: String,
    doc: Option<String>,
    receiver: Option<String>,
    type_params: String,
    params: String,
    results: String,
    body: Vec<CodeFragment>,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            receiver: None,
            type_params: String::new(),
            params: String::new(),
            results: String::new(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Make this a method, e.g. `receiver("m *MockService")`.
    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Type parameter list including brackets, e.g. `[T any]`.
    pub fn type_params(mut self, type_params: impl Into<String>) -> Self {
        self.type_params = type_params.into();
        self
    }

    /// Parameter list without parentheses.
    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = params.into();
        self
    }

    /// Result clause including its leading space, e.g. ` (int, error)`.
    pub fn results(mut self, results: impl Into<String>) -> Self {
        self.results = results.into();
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add a fragment (for example a nested block) to the body.
    pub fn body_fragment(mut self, fragment: CodeFragment) -> Self {
        self.body.push(fragment);
        self
    }

    fn header(&self) -> String {
        let receiver = self
            .receiver
            .as_ref()
            .map(|r| format!("({}) ", r))
            .unwrap_or_default();
        format!(
            "func {}{}{}({}){} {{",
            receiver, self.name, self.type_params, self.params, self.results
        )
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Func {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::comment(doc));
        }
        fragments.push(CodeFragment::braced(self.header(), self.body.clone()));
        fragments
    }
}
