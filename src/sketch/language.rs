//! Source language selection and grammar dispatch

use crate::error::GrammarError;
use std::fmt;
use std::str::FromStr;
use tree_sitter::Language;

/// Construct kinds that contribute a node to the sketch diagram.
///
/// The dispatch over construct kinds is a match on this closed set; any
/// grammar kind with no mapping is traversed for its children but emits
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Construct {
    Function,
    If,
    For,
    While,
}

/// Source languages with a bundled tree-sitter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Python,
    Rust,
    JavaScript,
}

impl SourceLanguage {
    /// Detect the language from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "py" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Human-readable language name
    pub fn name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::JavaScript => "JavaScript",
        }
    }

    /// The tree-sitter grammar for this language
    pub(crate) fn grammar(self) -> Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Map a grammar node kind to the construct it represents, if any.
    ///
    /// Python `elif` clauses count as if-constructs: the grammar gives them
    /// their own kind, but they are conditionals all the same. `else`
    /// clauses emit nothing.
    pub(crate) fn classify(self, kind: &str) -> Option<Construct> {
        match self {
            Self::Python => match kind {
                "function_definition" => Some(Construct::Function),
                "if_statement" | "elif_clause" => Some(Construct::If),
                "for_statement" => Some(Construct::For),
                "while_statement" => Some(Construct::While),
                _ => None,
            },
            Self::Rust => match kind {
                "function_item" => Some(Construct::Function),
                "if_expression" => Some(Construct::If),
                "for_expression" => Some(Construct::For),
                "while_expression" => Some(Construct::While),
                _ => None,
            },
            Self::JavaScript => match kind {
                "function_declaration" | "method_definition" => Some(Construct::Function),
                "if_statement" => Some(Construct::If),
                "for_statement" | "for_in_statement" => Some(Construct::For),
                "while_statement" | "do_statement" => Some(Construct::While),
                _ => None,
            },
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceLanguage {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "rust" | "rs" => Ok(Self::Rust),
            "javascript" | "js" => Ok(Self::JavaScript),
            _ => Err(GrammarError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceLanguage::from_extension("py"), Some(SourceLanguage::Python));
        assert_eq!(SourceLanguage::from_extension("rs"), Some(SourceLanguage::Rust));
        assert_eq!(SourceLanguage::from_extension("mjs"), Some(SourceLanguage::JavaScript));
        assert_eq!(SourceLanguage::from_extension("PY"), Some(SourceLanguage::Python));
        assert_eq!(SourceLanguage::from_extension("xyz"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("python".parse::<SourceLanguage>().unwrap(), SourceLanguage::Python);
        assert_eq!("JS".parse::<SourceLanguage>().unwrap(), SourceLanguage::JavaScript);
        assert!("cobol".parse::<SourceLanguage>().is_err());
    }

    #[test]
    fn test_classify_python_constructs() {
        let lang = SourceLanguage::Python;
        assert_eq!(lang.classify("function_definition"), Some(Construct::Function));
        assert_eq!(lang.classify("if_statement"), Some(Construct::If));
        assert_eq!(lang.classify("elif_clause"), Some(Construct::If));
        assert_eq!(lang.classify("for_statement"), Some(Construct::For));
        assert_eq!(lang.classify("while_statement"), Some(Construct::While));
        assert_eq!(lang.classify("class_definition"), None);
        assert_eq!(lang.classify("else_clause"), None);
    }

    #[test]
    fn test_classify_is_per_language() {
        // Rust's construct kinds mean nothing to the Python grammar map
        assert_eq!(SourceLanguage::Python.classify("function_item"), None);
        assert_eq!(SourceLanguage::Rust.classify("function_item"), Some(Construct::Function));
    }
}
