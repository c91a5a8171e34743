//! Rule to enforce a maximum number of statements per physical source line.
//!
//! The rule is a line-grouping state machine fed by the traversal driver's
//! enter/leave events. Statements are attributed to the line they start
//! on; when a statement's body spills onto a later line (a multi-line
//! block), the leave event re-synchronizes grouping on the line of the
//! statement's last real token. Each line group yields at most one
//! diagnostic, anchored at the first statement that pushed the count past
//! the configured maximum, with a fix that inserts a line break in front
//! of that statement.

use crate::ast::{NodeId, NodeKind, SyntaxTree};
use crate::config::MaxStatementsPerLineConfig;
use crate::diagnostic::{Diagnostic, TextEdit};
use crate::rule::{Rule, RuleContext, RuleMeta};

/// Identity metadata for [`MaxStatementsPerLine`].
pub static MAX_STATEMENTS_PER_LINE_META: RuleMeta = RuleMeta {
    name: "max-statements-per-line",
    description: "enforce a maximum number of statements allowed per line",
    fixable: true,
    message_ids: &["exceed"],
};

/// Decides whether a node counts as an independent statement.
///
/// A node is skipped when it has no parent (the program root), or when it
/// is the non-block body of a control construct: `if (a) foo();` counts as
/// one statement, the `if` itself. The `else` branch is the exception --
/// `if (a) foo(); else bar();` counts as two, because the alternate slot
/// is an independently countable statement.
///
/// The exclusion looks only at the direct parent. In a nested chain like
/// `if (a) if (b) foo();` each level is exempted on its own, so the whole
/// chain still counts once.
pub fn is_countable(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };
    match tree.kind(parent) {
        NodeKind::DoWhile
        | NodeKind::For
        | NodeKind::ForIn
        | NodeKind::ForOf
        | NodeKind::Labeled
        | NodeKind::While
        | NodeKind::ExportDefault
        | NodeKind::ExportNamed => false,
        NodeKind::If { alternate } => alternate == Some(node),
        NodeKind::Program
        | NodeKind::Block
        | NodeKind::Empty
        | NodeKind::Break
        | NodeKind::Continue
        | NodeKind::Debugger
        | NodeKind::Expression
        | NodeKind::FunctionDeclaration
        | NodeKind::ClassDeclaration
        | NodeKind::ImportDeclaration
        | NodeKind::Return
        | NodeKind::Switch
        | NodeKind::Throw
        | NodeKind::Try
        | NodeKind::VariableDeclaration
        | NodeKind::With
        | NodeKind::ExportAll => true,
    }
}

/// The live line group: one instance per file pass.
#[derive(Debug, Default)]
struct LineGroup {
    /// The line statements are currently being attributed to.
    current_line: usize,
    /// Countable statements seen on `current_line` so far.
    statement_count: usize,
    /// The first node that pushed the count past the maximum, if any.
    /// Always belongs to `current_line`; set at most once per group.
    first_overflow: Option<NodeId>,
}

/// Statement-density checker with auto-fix support.
#[derive(Debug)]
pub struct MaxStatementsPerLine {
    max: usize,
    group: LineGroup,
}

impl MaxStatementsPerLine {
    /// Creates the rule from its resolved configuration.
    pub fn new(config: MaxStatementsPerLineConfig) -> Self {
        MaxStatementsPerLine {
            max: config.max,
            group: LineGroup::default(),
        }
    }

    /// Creates the rule with an explicit maximum.
    pub fn with_max(max: usize) -> Self {
        Self::new(MaxStatementsPerLineConfig { max })
    }

    /// Finalizes the pending line group: emits at most one diagnostic (for
    /// the recorded overflow node) and clears overflow tracking. A flush
    /// with no overflow recorded is a no-op, never an error.
    fn flush(&mut self, ctx: &mut RuleContext<'_>) {
        if let Some(node) = self.group.first_overflow.take() {
            let span = ctx.tree().span(node);
            tracing::debug!(
                line = self.group.current_line,
                count = self.group.statement_count,
                max = self.max,
                "line exceeds statement maximum"
            );
            ctx.report(Diagnostic {
                rule: MAX_STATEMENTS_PER_LINE_META.name,
                message_id: "exceed",
                message: format!("This line has more than {} statements.", self.max),
                count_on_line: self.group.statement_count,
                max: self.max,
                span,
                fix: Some(TextEdit::insertion(span.start.offset, "\n")),
            });
        }
    }
}

impl Rule for MaxStatementsPerLine {
    fn meta(&self) -> &'static RuleMeta {
        &MAX_STATEMENTS_PER_LINE_META
    }

    fn enter_statement(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        if !is_countable(ctx.tree(), node) {
            return;
        }
        let line = ctx.tree().span(node).start.line;

        if line == self.group.current_line {
            self.group.statement_count += 1;
        } else {
            self.flush(ctx);
            self.group.statement_count = 1;
            self.group.current_line = line;
        }

        if self.group.statement_count == self.max + 1 && self.group.first_overflow.is_none() {
            tracing::trace!(line, node = node.index(), "first overflow on line");
            self.group.first_overflow = Some(node);
        }
    }

    fn leave_statement(&mut self, node: NodeId, ctx: &mut RuleContext<'_>) {
        // Group by where the statement visually terminates: the last token
        // that is not a trailing `;`. Falls back to the node's own end
        // when the host supplied no tokens for this span.
        let span = ctx.tree().span(node);
        let line = match ctx.source().actual_last_token(span) {
            Some(token) => token.span.end.line,
            None => span.end.line,
        };

        if line != self.group.current_line {
            self.flush(ctx);
            self.group.statement_count = 1;
            self.group.current_line = line;
        }
    }

    fn finish(&mut self, ctx: &mut RuleContext<'_>) {
        // The final line's group never sees another boundary crossing.
        self.flush(ctx);
        self.group = LineGroup::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TreeBuilder;
    use crate::source::SourceCode;
    use crate::walk::lint_tree;

    fn check(tree: &SyntaxTree, source: &SourceCode, max: usize) -> Vec<Diagnostic> {
        let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(MaxStatementsPerLine::with_max(max))];
        lint_tree(tree, source, &mut rules)
    }

    #[test]
    fn test_if_body_is_not_countable() {
        // if (a) foo();
        let source = SourceCode::new("if (a) foo();");
        let mut b = TreeBuilder::new(&source);
        b.start(NodeKind::If { alternate: None }, 0, 13);
        let body = b.leaf(NodeKind::Expression, 7, 13);
        b.end().unwrap();
        let tree = b.finish().unwrap();

        let if_id = tree.children(tree.root())[0];
        assert!(is_countable(&tree, if_id));
        assert!(!is_countable(&tree, body));
    }

    #[test]
    fn test_alternate_branch_is_countable() {
        // if (a) foo(); else bar();
        let source = SourceCode::new("if (a) foo(); else bar();");
        let mut b = TreeBuilder::new(&source);
        b.start(NodeKind::If { alternate: None }, 0, 25);
        let consequent = b.leaf(NodeKind::Expression, 7, 13);
        let alternate = b.leaf(NodeKind::Expression, 19, 25);
        b.mark_alternate(alternate).unwrap();
        b.end().unwrap();
        let tree = b.finish().unwrap();

        assert!(!is_countable(&tree, consequent));
        assert!(is_countable(&tree, alternate));
    }

    #[test]
    fn test_root_is_never_countable() {
        let source = SourceCode::new("");
        let tree = TreeBuilder::new(&source).finish().unwrap();
        assert!(!is_countable(&tree, tree.root()));
    }

    #[test]
    fn test_loop_and_export_bodies_are_not_countable() {
        // for (;;) a(); -- plus an export default wrapping a declaration.
        let source = SourceCode::new("for (;;) a();\nexport default class C {}");
        let mut b = TreeBuilder::new(&source);
        b.start(NodeKind::For, 0, 13);
        let loop_body = b.leaf(NodeKind::Expression, 9, 13);
        b.end().unwrap();
        b.start(NodeKind::ExportDefault, 14, 39);
        let exported = b.leaf(NodeKind::ClassDeclaration, 29, 39);
        b.end().unwrap();
        let tree = b.finish().unwrap();

        assert!(!is_countable(&tree, loop_body));
        assert!(!is_countable(&tree, exported));
    }

    #[test]
    fn test_block_children_are_countable() {
        // if (a) { foo(); }
        let source = SourceCode::new("if (a) { foo(); }");
        let mut b = TreeBuilder::new(&source);
        b.start(NodeKind::If { alternate: None }, 0, 17);
        b.start(NodeKind::Block, 7, 17);
        let inner = b.leaf(NodeKind::Expression, 9, 15);
        b.end().unwrap();
        b.end().unwrap();
        let tree = b.finish().unwrap();

        assert!(is_countable(&tree, inner));
    }

    #[test]
    fn test_two_statements_one_line_reports_second() {
        let source = SourceCode::new("a(); b();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        let second = b.leaf(NodeKind::Expression, 5, 9);
        let tree = b.finish().unwrap();

        let diagnostics = check(&tree, &source, 1);
        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.message_id, "exceed");
        assert_eq!(d.count_on_line, 2);
        assert_eq!(d.max, 1);
        assert_eq!(d.span, tree.span(second));
        assert_eq!(d.fix.as_ref().unwrap().offset, 5);
    }

    #[test]
    fn test_statements_on_separate_lines_pass() {
        let source = SourceCode::new("a();\nb();\nc();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        b.leaf(NodeKind::Expression, 5, 9);
        b.leaf(NodeKind::Expression, 10, 14);
        let tree = b.finish().unwrap();

        assert!(check(&tree, &source, 1).is_empty());
    }

    #[test]
    fn test_only_first_overflow_is_anchored() {
        let source = SourceCode::new("a(); b(); c(); d();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        let second = b.leaf(NodeKind::Expression, 5, 9);
        b.leaf(NodeKind::Expression, 10, 14);
        b.leaf(NodeKind::Expression, 15, 19);
        let tree = b.finish().unwrap();

        let diagnostics = check(&tree, &source, 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].count_on_line, 4);
        assert_eq!(diagnostics[0].span, tree.span(second));
    }

    #[test]
    fn test_max_zero_flags_first_statement() {
        let source = SourceCode::new("a();");
        let mut b = TreeBuilder::new(&source);
        let only = b.leaf(NodeKind::Expression, 0, 4);
        let tree = b.finish().unwrap();

        let diagnostics = check(&tree, &source, 0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span, tree.span(only));
        assert_eq!(diagnostics[0].count_on_line, 1);
    }

    #[test]
    fn test_higher_max_allows_denser_lines() {
        let source = SourceCode::new("a(); b(); c();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        b.leaf(NodeKind::Expression, 5, 9);
        b.leaf(NodeKind::Expression, 10, 14);
        let tree = b.finish().unwrap();

        assert!(check(&tree, &source, 3).is_empty());
        assert_eq!(check(&tree, &source, 2).len(), 1);
    }

    #[test]
    fn test_rule_state_resets_between_files() {
        let source = SourceCode::new("a(); b();");
        let mut b = TreeBuilder::new(&source);
        b.leaf(NodeKind::Expression, 0, 4);
        b.leaf(NodeKind::Expression, 5, 9);
        let tree = b.finish().unwrap();

        let mut rules: Vec<Box<dyn Rule>> = vec![Box::new(MaxStatementsPerLine::with_max(1))];
        let first = lint_tree(&tree, &source, &mut rules);
        let second = lint_tree(&tree, &source, &mut rules);
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(first, second);
    }
}
