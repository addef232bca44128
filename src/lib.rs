//! # flowsketch - Control-Flow Sketch Diagrams for Code Snippets
//!
//! Parses a source-code snippet with tree-sitter, walks the syntax tree in
//! pre-order, and emits a flat diagram with one labeled node per function
//! definition, if, for, and while construct. A companion linter runs the
//! same kind of tree walk to flag over-long functions and identifiers that
//! break the lowercase naming convention.
//!
//! ## Key behaviors
//!
//! - **One node per construct**: functions become `Function: <name>`,
//!   conditionals `If condition`, loops `For loop` / `While loop`; node ids
//!   count up from `node_0` and reset on every build.
//! - **Errors become data**: a snippet that fails to parse yields a
//!   single-node diagram describing the failure. [`sketch::SketchBuilder::build`]
//!   never returns an error to its caller.
//! - **Flat by design**: the diagram carries no edges between nodes; this
//!   is a known limitation of the output contract, kept stable rather than
//!   patched with a guessed edge policy. Hand the node list to a
//!   graph-rendering collaborator if layout is needed.
//!
//! ## Modules
//!
//! - [`sketch`]: the sketch builder, diagram types, and DOT serialization
//! - [`lint`]: tree-walk lint checks (function complexity, naming)
//! - [`config`]: configuration with TOML file and environment overrides
//! - [`error`]: error types and utilities
//! - [`paths`]: platform config-path resolution
//!
//! ## Usage Example
//!
//! ```
//! use flowsketch::sketch::{SketchBuilder, SourceLanguage};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut builder = SketchBuilder::new(SourceLanguage::Python)?;
//! let diagram = builder.build("def greet():\n    pass\n");
//!
//! assert_eq!(diagram.len(), 1);
//! assert_eq!(diagram.nodes()[0].label, "Function: greet");
//! # Ok(())
//! # }
//! ```

/// Configuration management with environment variable overrides
pub mod config;

/// Error types and utilities
pub mod error;

/// Tree-walk lint checks
pub mod lint;

/// Platform config-path resolution
pub mod paths;

/// Control-flow sketch builder and diagram types
pub mod sketch;
