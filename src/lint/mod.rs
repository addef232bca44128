//! Tree-walk lint checks
//!
//! Two intentionally naive checks over the same parse trees the sketch
//! builder uses: functions whose subtree grows past a configured node
//! count, and identifier references that break the lowercase naming
//! convention. A snippet that fails to parse produces a single parse-error
//! issue and skips the walks.

use crate::config::LintConfig;
use crate::error::GrammarError;
use crate::sketch::SourceLanguage;
use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::{Node, Parser};

/// A single lint finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The snippet could not be parsed
    ParseError { message: String },
    /// A function subtree exceeds the configured node count
    FunctionTooComplex { name: String, line: usize },
    /// An identifier reference is not lowercase
    NamingConvention { name: String, line: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::ParseError { message } => write!(f, "Parsing error: {}", message),
            Issue::FunctionTooComplex { name, .. } => {
                write!(f, "Function '{}' might be too complex", name)
            }
            Issue::NamingConvention { name, .. } => {
                write!(
                    f,
                    "Variable '{}' should use lowercase naming convention",
                    name
                )
            }
        }
    }
}

/// Runs the tree-walk checks over source snippets.
///
/// Holds a parser for one language plus the check thresholds; like the
/// sketch builder, an instance serves one caller at a time.
pub struct Linter {
    parser: Parser,
    language: SourceLanguage,
    config: LintConfig,
}

impl Linter {
    /// Create a linter for the given language and thresholds
    pub fn new(language: SourceLanguage, config: LintConfig) -> Result<Self, GrammarError> {
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
            config,
        })
    }

    /// Create a linter with default thresholds
    pub fn with_defaults(language: SourceLanguage) -> Result<Self, GrammarError> {
        Self::new(language, LintConfig::default())
    }

    /// Run all checks over a source snippet
    pub fn check(&mut self, source: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        let Some(tree) = self.parser.parse(source, None) else {
            issues.push(Issue::ParseError {
                message: "parser produced no syntax tree".to_string(),
            });
            return issues;
        };

        let root = tree.root_node();
        if root.has_error() {
            // without a clean tree the walks would report nonsense
            issues.push(Issue::ParseError {
                message: format!("{} snippet contains invalid syntax", self.language.name()),
            });
            return issues;
        }

        self.check_complexity(root, source.as_bytes(), &mut issues);
        self.check_naming(root, source.as_bytes(), &mut issues);

        tracing::debug!(
            language = self.language.name(),
            issues = issues.len(),
            "lint complete"
        );
        issues
    }

    /// Flag functions whose subtree holds more named nodes than the
    /// configured threshold
    fn check_complexity(&self, node: Node, source: &[u8], issues: &mut Vec<Issue>) {
        if is_function_kind(self.language, node.kind())
            && named_node_count(node) > self.config.max_function_nodes
        {
            let name = node
                .child_by_field_name("name")
                .and_then(|n| n.utf8_text(source).ok())
                .unwrap_or("<anonymous>")
                .to_string();
            issues.push(Issue::FunctionTooComplex {
                name,
                line: node.start_position().row + 1,
            });
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.check_complexity(child, source, issues);
        }
    }

    /// Flag identifier references that are not lowercase
    fn check_naming(&self, node: Node, source: &[u8], issues: &mut Vec<Issue>) {
        if node.kind() == "identifier"
            && is_reference_position(node)
            && let Ok(name) = node.utf8_text(source)
            && !is_lowercase_name(name)
        {
            issues.push(Issue::NamingConvention {
                name: name.to_string(),
                line: node.start_position().row + 1,
            });
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.check_naming(child, source, issues);
        }
    }
}

/// Grammar kinds the complexity check treats as function definitions
fn is_function_kind(language: SourceLanguage, kind: &str) -> bool {
    matches!(
        (language, kind),
        (SourceLanguage::Python, "function_definition")
            | (SourceLanguage::Rust, "function_item")
            | (
                SourceLanguage::JavaScript,
                "function_declaration" | "method_definition"
            )
    )
}

/// Count the named nodes in a subtree, the node itself included
fn named_node_count(node: Node) -> usize {
    let mut count = 1;
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        count += named_node_count(child);
    }
    count
}

/// Whether an identifier occurrence is a variable reference rather than a
/// definition name, an attribute/member tail, or a parameter declaration
fn is_reference_position(node: Node) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };

    match parent.kind() {
        // definition names declare rather than reference
        "function_definition" | "class_definition" | "function_item"
        | "function_declaration" | "method_definition" | "class_declaration"
        | "struct_item" | "enum_item" | "mod_item" => {
            parent.child_by_field_name("name") != Some(node)
        }
        // the tail of an attribute/member access; the receiver still counts
        "attribute" => parent.child_by_field_name("attribute") != Some(node),
        "field_expression" => parent.child_by_field_name("field") != Some(node),
        "member_expression" => parent.child_by_field_name("property") != Some(node),
        // keyword-argument names
        "keyword_argument" => parent.child_by_field_name("name") != Some(node),
        // parameter lists declare names
        "parameters" | "formal_parameters" | "typed_parameter" | "default_parameter"
        | "typed_default_parameter" => false,
        _ => true,
    }
}

/// Lowercase in the Python `str.islower` sense: at least one cased
/// character and none of them uppercase
fn is_lowercase_name(name: &str) -> bool {
    let mut has_cased = false;
    for c in name.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            has_cased = true;
        }
    }
    has_cased
}
