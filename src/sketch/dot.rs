//! Graphviz DOT serialization for sketch diagrams
//!
//! Text emission only: layout and drawing belong to whatever renderer
//! consumes the output.

use super::Diagram;

impl Diagram {
    /// Render the diagram as a Graphviz DOT document.
    ///
    /// Emits one node declaration per diagram node and no edges, matching
    /// the edge-less diagram contract.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph sketch {\n");
        for node in self.nodes() {
            out.push_str(&format!(
                "    {} [label=\"{}\"];\n",
                node.id,
                escape_label(&node.label)
            ));
        }
        out.push_str("}\n");
        out
    }
}

/// Escape a label for use inside a double-quoted DOT string
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::super::{SketchBuilder, SourceLanguage};
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_empty_diagram_to_dot() {
        let dot = Diagram::default().to_dot();
        assert_eq!(dot, "digraph sketch {\n}\n");
    }

    #[test]
    fn test_diagram_to_dot_lists_every_node() {
        let mut builder = SketchBuilder::new(SourceLanguage::Python).unwrap();
        let diagram = builder.build("def foo():\n    if x:\n        pass\n");

        let dot = diagram.to_dot();
        assert!(dot.starts_with("digraph sketch {"));
        assert!(dot.contains("node_0 [label=\"Function: foo\"];"));
        assert!(dot.contains("node_1 [label=\"If condition\"];"));
        // no edges, by contract
        assert!(!dot.contains("->"));
    }
}
