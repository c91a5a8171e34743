//! Syntax-tree interface.
//!
//! The parser is an external collaborator: it produces a [`SyntaxTree`]
//! through the [`TreeBuilder`] API and hands it, read-only, to the checker
//! core. Nodes live in an arena and carry a closed [`NodeKind`] tag, a
//! source span, a parent back-reference, and document-ordered children.
//!
//! The kind set is a sealed enumeration dispatched with exhaustive pattern
//! matching, so an unrecognized kind is a compile error rather than a
//! runtime surprise. Only the kind that can actually have an `else` branch
//! ([`NodeKind::If`]) exposes an alternate slot.

use crate::error::{Result, StatlineError};
use crate::source::{SourceCode, Span};

/// Index of a node in its owning [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The closed set of syntax-node kinds the checker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The file root. Never counted; its exit triggers the final flush.
    Program,
    /// A `{ ... }` block. Not a statement for counting purposes.
    Block,
    /// A lone `;`. Not a statement for counting purposes.
    Empty,
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `debugger;`
    Debugger,
    /// `do ... while (...)`
    DoWhile,
    /// An expression statement such as a call.
    Expression,
    /// `for (;;) ...`
    For,
    /// `for (x in y) ...`
    ForIn,
    /// `for (x of y) ...`
    ForOf,
    /// `function f() { ... }`
    FunctionDeclaration,
    /// `class C { ... }`
    ClassDeclaration,
    /// `if (...) ... else ...`; the alternate slot is the `else` branch.
    If {
        /// The statement occupying the `else` branch, when present.
        alternate: Option<NodeId>,
    },
    /// `import ... from '...'`
    ImportDeclaration,
    /// `label: ...`
    Labeled,
    /// `return ...;`
    Return,
    /// `switch (...) { ... }`
    Switch,
    /// `throw ...;`
    Throw,
    /// `try { ... } catch ...`
    Try,
    /// `let`/`const`/`var` declaration.
    VariableDeclaration,
    /// `while (...) ...`
    While,
    /// `with (...) ...`
    With,
    /// `export { ... }` / `export const ...`
    ExportNamed,
    /// `export default ...`
    ExportDefault,
    /// `export * from '...'`
    ExportAll,
}

impl NodeKind {
    /// Returns `true` for the kinds that take part in the statement event
    /// stream. `Program`, `Block`, and `Empty` are structural only.
    pub fn is_statement(self) -> bool {
        !matches!(self, NodeKind::Program | NodeKind::Block | NodeKind::Empty)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable parsed syntax tree over one file's source.
///
/// Owned by the host; the checker core only reads from it. Node 0 is
/// always the `Program` root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Returns the `Program` root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the kind tag of a node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Returns the source span of a node.
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.0].span
    }

    /// Returns the parent of a node, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns a node's children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// Incremental construction API for [`SyntaxTree`].
///
/// This is the parser-facing half of the interface: a parser (or a test)
/// opens nodes in document order with [`start`](TreeBuilder::start), closes
/// them with [`end`](TreeBuilder::end), and finally calls
/// [`finish`](TreeBuilder::finish). Spans are given as byte-offset pairs
/// and resolved against the file's [`SourceCode`].
pub struct TreeBuilder<'a> {
    source: &'a SourceCode,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder whose root `Program` spans the entire source.
    pub fn new(source: &'a SourceCode) -> Self {
        let root = NodeData {
            kind: NodeKind::Program,
            span: source.span_at(0, source.text().len()),
            parent: None,
            children: Vec::new(),
        };
        TreeBuilder {
            source,
            nodes: vec![root],
            stack: vec![NodeId(0)],
        }
    }

    /// Opens a node spanning `start..end` as a child of the current node
    /// and makes it the current node.
    pub fn start(&mut self, kind: NodeKind, start: usize, end: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = *self.stack.last().expect("builder stack never empty");
        self.nodes.push(NodeData {
            kind,
            span: self.source.span_at(start, end),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        self.stack.push(id);
        id
    }

    /// Closes the current node, returning to its parent.
    ///
    /// # Errors
    ///
    /// Returns a `TreeError` when called without a matching `start`.
    pub fn end(&mut self) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(StatlineError::tree_error(
                "end() called with no open node",
            ));
        }
        self.stack.pop();
        Ok(())
    }

    /// Adds a childless node spanning `start..end` under the current node.
    pub fn leaf(&mut self, kind: NodeKind, start: usize, end: usize) -> NodeId {
        let id = self.start(kind, start, end);
        self.stack.pop();
        id
    }

    /// Records `child` as the alternate (`else`) branch of its parent.
    ///
    /// # Errors
    ///
    /// Returns a `TreeError` when the child's parent is not an `If` node.
    pub fn mark_alternate(&mut self, child: NodeId) -> Result<()> {
        let parent = self.nodes[child.0]
            .parent
            .ok_or_else(|| StatlineError::tree_error("root node cannot be an alternate"))?;
        match &mut self.nodes[parent.0].kind {
            NodeKind::If { alternate } => {
                *alternate = Some(child);
                Ok(())
            }
            other => Err(StatlineError::tree_error(format!(
                "alternate marked on {:?}, which has no alternate slot",
                other
            ))),
        }
    }

    /// Finalizes the tree.
    ///
    /// # Errors
    ///
    /// Returns a `TreeError` when nodes are still open.
    pub fn finish(self) -> Result<SyntaxTree> {
        if self.stack.len() != 1 {
            return Err(StatlineError::tree_error(format!(
                "{} node(s) left open at finish",
                self.stack.len() - 1
            )));
        }
        Ok(SyntaxTree { nodes: self.nodes })
    }
}
