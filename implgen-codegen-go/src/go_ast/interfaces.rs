//! Go interface type builder.

use implgen_codegen::builder::{CodeFragment, Renderable};

/// Builder for Go interface type declarations.
#[derive(Debug, Clone)]
pub struct InterfaceType {
    name: String,
    doc: Option<String>,
    type_params: String,
    methods: Vec<String>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            type_params: String::new(),
            methods: Vec::new(),
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

    /// Add a method spec, e.g. `Get(id int) (string, error)`.
    pub fn method(mut self, spec: impl Into<String>) -> Self {
        self.methods.push(spec.into());
        self
    }
}

impl Renderable for InterfaceType {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::comment(doc));
        }
        let header = format!("type {}{} interface {{", self.name, self.type_params);
        if self.methods.is_empty() {
            fragments.push(CodeFragment::line(format!("{}}}", header)));
        } else {
            fragments.push(CodeFragment::braced(
                header,
                self.methods.iter().map(CodeFragment::line).collect(),
            ));
        }
        fragments
    }
}

#[cfg(test)]
mod tests {
    use implgen_codegen::builder::CodeBuilder;

    use super::*;

    fn build(intf: &InterfaceType) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(intf);
        builder.build()
    }

    #[test]
    fn test_interface_methods() {
        let intf = InterfaceType::new("TracedService")
            .method("Close() error")
            .method("Get(ctx context.Context, id int) (string, error)");
        assert_eq!(
            build(&intf),
            "type TracedService interface {\n\tClose() error\n\tGet(ctx context.Context, id int) (string, error)\n}\n"
        );
    }

    #[test]
    fn test_empty_interface() {
        let intf = InterfaceType::new("MetricsMarker");
        assert_eq!(build(&intf), "type MetricsMarker interface {}\n");
    }
}
