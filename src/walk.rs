//! Traversal driver.
//!
//! Walks a [`SyntaxTree`] in document order, delivering pre-order
//! `enter_statement` and post-order `leave_statement` events for every
//! statement-kind node, then a terminal `finish` when the program root is
//! left. Traversal is single-threaded and synchronous: one event at a
//! time, no suspension points, no I/O.

use crate::ast::{NodeId, SyntaxTree};
use crate::diagnostic::Diagnostic;
use crate::rule::{Rule, RuleContext};
use crate::source::SourceCode;

/// Runs a set of rules over one file in a single traversal and returns the
/// collected diagnostics.
///
/// Each invocation owns its own [`RuleContext`]; separate files may be
/// checked in parallel by the host without coordination as long as each
/// call gets its own rule instances.
pub fn lint_tree(
    tree: &SyntaxTree,
    source: &SourceCode,
    rules: &mut [Box<dyn Rule>],
) -> Vec<Diagnostic> {
    let mut ctx = RuleContext::new(tree, source);
    walk_node(tree, tree.root(), rules, &mut ctx);
    for rule in rules.iter_mut() {
        rule.finish(&mut ctx);
    }
    let diagnostics = ctx.into_diagnostics();
    tracing::debug!(
        nodes = tree.len(),
        diagnostics = diagnostics.len(),
        "traversal complete"
    );
    diagnostics
}

fn walk_node(tree: &SyntaxTree, node: NodeId, rules: &mut [Box<dyn Rule>], ctx: &mut RuleContext<'_>) {
    let is_statement = tree.kind(node).is_statement();
    if is_statement {
        for rule in rules.iter_mut() {
            rule.enter_statement(node, ctx);
        }
    }
    for &child in tree.children(node) {
        walk_node(tree, child, rules, ctx);
    }
    if is_statement {
        for rule in rules.iter_mut() {
            rule.leave_statement(node, ctx);
        }
    }
}
