//! Control-flow sketch construction
//!
//! Walks a tree-sitter parse tree in pre-order and emits one labeled node
//! per function definition, if, for, and while construct. The resulting
//! diagram is flat: nodes only, no edges. A known limitation of the output
//! contract, kept stable rather than patched with a guessed edge policy.

mod dot;
mod language;

pub use language::SourceLanguage;

use crate::error::GrammarError;
use language::Construct;
use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Parser};

/// A single labeled node in a sketch diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Node id, `node_0`, `node_1`, ... in traversal order
    pub id: String,
    /// Human-readable construct label
    pub label: String,
}

/// The flat, edge-less collection of labeled nodes produced by a build.
///
/// Node order is the pre-order traversal of the source: parent before
/// children, siblings in source order. Owned by the caller once returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
}

impl Diagram {
    /// The nodes of this diagram as (id, label) records
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Number of nodes in the diagram
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the diagram holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, id: String, label: String) {
        self.nodes.push(DiagramNode { id, label });
    }
}

/// Builds control-flow sketch diagrams from source snippets.
///
/// The builder is stateful (node counter plus the diagram under
/// construction, both reset at the start of every build) and is not safe
/// for concurrent reuse; give each logical caller its own instance or
/// serialize access externally.
pub struct SketchBuilder {
    parser: Parser,
    language: SourceLanguage,
    node_count: usize,
    diagram: Diagram,
}

impl SketchBuilder {
    /// Create a builder for the given source language
    pub fn new(language: SourceLanguage) -> Result<Self, GrammarError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| GrammarError::LoadFailed {
                language: language.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            parser,
            language,
            node_count: 0,
            diagram: Diagram::default(),
        })
    }

    /// The language this builder parses
    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Build a sketch diagram from a source snippet.
    ///
    /// Never returns an error: a snippet that fails to parse yields a
    /// diagram holding a single node (id `error`) whose label describes the
    /// failure. No state leaks between calls; node ids restart at `node_0`
    /// on every invocation.
    pub fn build(&mut self, source: &str) -> Diagram {
        self.node_count = 0;
        self.diagram = Diagram::default();

        let Some(tree) = self.parser.parse(source, None) else {
            return self.error_diagram("parser produced no syntax tree");
        };

        let root = tree.root_node();
        if root.has_error() {
            let detail = first_error_node(root)
                .map(|node| {
                    let pos = node.start_position();
                    format!(
                        "invalid syntax at line {}, column {}",
                        pos.row + 1,
                        pos.column + 1
                    )
                })
                .unwrap_or_else(|| "invalid syntax".to_string());
            return self.error_diagram(&detail);
        }

        self.visit(root, source.as_bytes());

        tracing::debug!(
            language = self.language.name(),
            nodes = self.diagram.len(),
            "sketch complete"
        );
        std::mem::take(&mut self.diagram)
    }

    /// Pre-order walk: emit a node for the construct, then recurse into
    /// children in source order
    fn visit(&mut self, node: Node, source: &[u8]) {
        if let Some(construct) = self.language.classify(node.kind()) {
            let label = match construct {
                Construct::Function => format!("Function: {}", definition_name(node, source)),
                Construct::If => "If condition".to_string(),
                Construct::For => "For loop".to_string(),
                Construct::While => "While loop".to_string(),
            };
            let id = format!("node_{}", self.node_count);
            self.node_count += 1;
            self.diagram.push(id, label);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, source);
        }
    }

    fn error_diagram(&mut self, detail: &str) -> Diagram {
        tracing::debug!(language = self.language.name(), detail, "sketch failed to parse");
        self.diagram.push(
            "error".to_string(),
            format!("Error generating sketch: {}", detail),
        );
        std::mem::take(&mut self.diagram)
    }
}

/// Extract the name of a definition node via its `name` field
fn definition_name(node: Node, source: &[u8]) -> String {
    node.child_by_field_name("name")
        .and_then(|name| name.utf8_text(source).ok())
        .unwrap_or("<anonymous>")
        .to_string()
}

/// Find the first error or missing node in the tree, if any
fn first_error_node(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python_builder() -> SketchBuilder {
        SketchBuilder::new(SourceLanguage::Python).unwrap()
    }

    fn labels(diagram: &Diagram) -> Vec<&str> {
        diagram.nodes().iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_diagram() {
        let mut builder = python_builder();
        assert!(builder.build("").is_empty());
        assert!(builder.build("   \n\n  ").is_empty());
    }

    #[test]
    fn test_single_function() {
        let mut builder = python_builder();
        let diagram = builder.build("def foo():\n    pass\n");

        assert_eq!(diagram.len(), 1);
        assert_eq!(diagram.nodes()[0].id, "node_0");
        assert_eq!(diagram.nodes()[0].label, "Function: foo");
    }

    #[test]
    fn test_single_if() {
        let mut builder = python_builder();
        let diagram = builder.build("if x:\n    pass\n");

        assert_eq!(labels(&diagram), vec!["If condition"]);
    }

    #[test]
    fn test_nested_constructs_in_pre_order() {
        let source = r#"
def process(items):
    for item in items:
        while item:
            item = item.next
"#;
        let mut builder = python_builder();
        let diagram = builder.build(source);

        assert_eq!(
            labels(&diagram),
            vec!["Function: process", "For loop", "While loop"]
        );
        let ids: Vec<&str> = diagram.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["node_0", "node_1", "node_2"]);
    }

    #[test]
    fn test_non_construct_kinds_emit_nothing() {
        let source = r#"
class Widget:
    x = 1

value = [i for i in range(3)]
"#;
        // class bodies and expressions are traversed but contribute no nodes
        let mut builder = python_builder();
        assert!(builder.build(source).is_empty());
    }

    #[test]
    fn test_elif_counts_as_if() {
        let source = r#"
if a:
    pass
elif b:
    pass
else:
    pass
"#;
        let mut builder = python_builder();
        let diagram = builder.build(source);

        assert_eq!(labels(&diagram), vec!["If condition", "If condition"]);
    }

    #[test]
    fn test_invalid_input_yields_single_error_node() {
        let mut builder = python_builder();
        let diagram = builder.build("def broken(:\n");

        assert_eq!(diagram.len(), 1);
        assert_eq!(diagram.nodes()[0].id, "error");
        assert!(diagram.nodes()[0].label.contains("Error generating sketch"));
    }

    #[test]
    fn test_counter_resets_between_builds() {
        let mut builder = python_builder();

        let first = builder.build("def a():\n    pass\n\ndef b():\n    pass\n");
        assert_eq!(first.len(), 2);

        let second = builder.build("while True:\n    pass\n");
        assert_eq!(second.len(), 1);
        assert_eq!(second.nodes()[0].id, "node_0");
    }

    #[test]
    fn test_build_recovers_after_error() {
        let mut builder = python_builder();

        let bad = builder.build("def broken(:\n");
        assert_eq!(bad.nodes()[0].id, "error");

        let good = builder.build("def fine():\n    pass\n");
        assert_eq!(good.len(), 1);
        assert_eq!(good.nodes()[0].id, "node_0");
        assert_eq!(good.nodes()[0].label, "Function: fine");
    }

    #[test]
    fn test_rust_constructs() {
        let source = r#"
fn main() {
    for i in 0..3 {
        if i > 1 {
            break;
        }
    }
    while false {}
}
"#;
        let mut builder = SketchBuilder::new(SourceLanguage::Rust).unwrap();
        let diagram = builder.build(source);

        assert_eq!(
            labels(&diagram),
            vec!["Function: main", "For loop", "If condition", "While loop"]
        );
    }

    #[test]
    fn test_javascript_constructs() {
        let source = r#"
function greet(name) {
    if (name) {
        while (true) { break; }
    }
    for (const c of name) {}
}
"#;
        let mut builder = SketchBuilder::new(SourceLanguage::JavaScript).unwrap();
        let diagram = builder.build(source);

        assert_eq!(
            labels(&diagram),
            vec!["Function: greet", "If condition", "While loop", "For loop"]
        );
    }

    #[test]
    fn test_diagram_serializes_to_json() {
        let mut builder = python_builder();
        let diagram = builder.build("def foo():\n    pass\n");

        let json = serde_json::to_string(&diagram).unwrap();
        assert!(json.contains("\"node_0\""));
        assert!(json.contains("Function: foo"));

        let back: Diagram = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diagram);
    }
}
