//! # Statline - Statements-per-line Style Checker
//!
//! Statline is a library for enforcing a maximum number of statements per
//! physical source line, with non-destructive auto-fixes. It is the core of
//! a family of style rules sharing one architecture: a single-pass
//! syntax-tree traversal feeding per-rule grouping state, with deferred
//! fix emission.
//!
//! ## Architecture
//!
//! Statline is organized into several modules:
//!
//! - [`ast`] - Syntax-tree interface and the parser-facing builder
//! - [`source`] - Source text, positions, spans, and tokens
//! - [`walk`] - Traversal driver delivering enter/leave events
//! - [`rule`] - The visitor-and-fixer contract every rule implements
//! - [`diagnostic`] - Diagnostics, text edits, and atomic edit application
//! - [`config`] - Configuration file loading, merging, and validation
//! - [`registry`] - Host-facing rule lookup and construction
//! - [`error`] - Centralized error types for the crate
//! - [`max_statements_per_line_rule`] - The statement-density rule itself
//!
//! ## Usage as a Library
//!
//! ```rust
//! use statline_core::ast::{NodeKind, TreeBuilder};
//! use statline_core::source::SourceCode;
//! use statline_core::registry::Registry;
//! use statline_core::walk::lint_tree;
//! use statline_core::config::StatlineConfig;
//!
//! # fn main() -> statline_core::error::Result<()> {
//! // The parser side of the interface: source text plus a tree.
//! let source = SourceCode::new("a(); b();");
//! let mut builder = TreeBuilder::new(&source);
//! builder.leaf(NodeKind::Expression, 0, 4);
//! builder.leaf(NodeKind::Expression, 5, 9);
//! let tree = builder.finish()?;
//!
//! // One pass over one file.
//! let registry = Registry::with_default_rules();
//! let mut rules = registry.build_rules(&StatlineConfig::default());
//! let diagnostics = lint_tree(&tree, &source, &mut rules);
//! assert_eq!(diagnostics.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Statline reads TOML configuration via [`StatlineConfig`]. See the
//! [`config`] module for file discovery and merge precedence.
//!
//! ## Error Handling
//!
//! All functions that can fail return [`Result<T>`], which is a type alias
//! for `std::result::Result<T, StatlineError>`. See the [`error`] module
//! for details on error types and handling.

// Module declarations
pub mod ast;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod max_statements_per_line_rule;
pub mod registry;
pub mod rule;
pub mod source;
pub mod walk;

// Public API exports
pub use crate::ast::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
pub use crate::diagnostic::{apply_edits, diagnostics_to_json, Diagnostic, TextEdit};
pub use crate::max_statements_per_line_rule::{
    is_countable, MaxStatementsPerLine, MAX_STATEMENTS_PER_LINE_META,
};
pub use crate::registry::{Registry, PLUGIN_NAME, PLUGIN_VERSION};
pub use crate::rule::{Rule, RuleContext, RuleMeta};
pub use crate::source::{Position, SourceCode, Span, Token, TokenKind};
pub use crate::walk::lint_tree;

// Config exports
pub use crate::config::{
    discover_and_load_config, load_config_from_path, MaxStatementsPerLineConfig,
    MaxStatementsPerLineOptions, Mergeable, StatlineConfig,
};

// Error exports
pub use crate::error::{Result, StatlineError as Error};
