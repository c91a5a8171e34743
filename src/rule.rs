//! Rule trait and per-file checking context.
//!
//! Every style rule in Statline follows the same visitor-and-fixer
//! contract: the traversal driver feeds it pre-order `enter` and
//! post-order `leave` events for statement-kind nodes, plus one `finish`
//! call when the program root is left. Rules report violations through the
//! [`RuleContext`], which owns the per-file diagnostic list.
//!
//! # Implementing a rule
//!
//! A rule keeps whatever grouping state it needs between events in its own
//! fields; the context is created fresh for every file, so no state ever
//! leaks across files.
//!
//! ```rust
//! use statline_core::ast::NodeId;
//! use statline_core::rule::{Rule, RuleContext, RuleMeta};
//!
//! struct CountEverything {
//!     seen: usize,
//! }
//!
//! static META: RuleMeta = RuleMeta {
//!     name: "count-everything",
//!     description: "counts statement enter events",
//!     fixable: false,
//!     message_ids: &[],
//! };
//!
//! impl Rule for CountEverything {
//!     fn meta(&self) -> &'static RuleMeta {
//!         &META
//!     }
//!
//!     fn enter_statement(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {
//!         self.seen += 1;
//!     }
//! }
//! ```

use crate::ast::{NodeId, SyntaxTree};
use crate::diagnostic::Diagnostic;
use crate::source::SourceCode;

/// Static identity metadata for a rule.
///
/// Consumed by the host registry for display and filtering; the checking
/// algorithm itself never interprets it.
#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    /// Stable rule name, e.g. `"max-statements-per-line"`.
    pub name: &'static str,
    /// Human-readable description, used for help text.
    pub description: &'static str,
    /// Whether the rule can emit auto-fixes.
    pub fixable: bool,
    /// Every message id this rule may emit.
    pub message_ids: &'static [&'static str],
}

/// Per-file checking context handed to rules during one traversal.
///
/// One context exists per file-processing invocation. It borrows the
/// immutable tree and source and accumulates the diagnostics the rules
/// report; it is discarded when the pass completes.
pub struct RuleContext<'a> {
    tree: &'a SyntaxTree,
    source: &'a SourceCode,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    /// Creates a fresh context for one file.
    pub fn new(tree: &'a SyntaxTree, source: &'a SourceCode) -> Self {
        RuleContext {
            tree,
            source,
            diagnostics: Vec::new(),
        }
    }

    /// The syntax tree being checked.
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// The source text and tokens being checked.
    pub fn source(&self) -> &'a SourceCode {
        self.source
    }

    /// Appends a diagnostic to this file's output list.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            rule = diagnostic.rule,
            message_id = diagnostic.message_id,
            line = diagnostic.span.start.line,
            "reporting diagnostic"
        );
        self.diagnostics.push(diagnostic);
    }

    /// The diagnostics reported so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the context, returning the collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// The visitor-and-fixer contract every Statline rule implements.
///
/// Default implementations are no-ops, so rules only override the events
/// they care about.
pub trait Rule {
    /// Static metadata for this rule.
    fn meta(&self) -> &'static RuleMeta;

    /// Called in pre-order for each statement-kind node.
    fn enter_statement(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {}

    /// Called in post-order for each statement-kind node.
    fn leave_statement(&mut self, _node: NodeId, _ctx: &mut RuleContext<'_>) {}

    /// Called once when the program root is left. Rules flush any pending
    /// state here and must leave themselves ready for the next file.
    fn finish(&mut self, _ctx: &mut RuleContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, TreeBuilder};
    use crate::diagnostic::Diagnostic;

    #[test]
    fn test_context_collects_reports_in_order() {
        let source = SourceCode::new("a(); b();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        b.leaf(NodeKind::Expression, 5, 9);
        let tree = b.finish().unwrap();

        let mut ctx = RuleContext::new(&tree, &source);
        for start in [0, 5] {
            ctx.report(Diagnostic {
                rule: "test-rule",
                message_id: "exceed",
                message: "test".to_string(),
                count_on_line: 2,
                max: 1,
                span: source.span_at(start, start + 4),
                fix: None,
            });
        }

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].span.start.offset < diagnostics[1].span.start.offset);
    }
}
