//! Arena syntax tree produced by [`SourceParser`](crate::SourceParser).
//!
//! Nodes live in a flat `Vec` indexed by [`NodeId`], with a parallel parent
//! index so ancestor walks are O(1) per step and no node holds a reference
//! to another. Only constructs the analyzer cares about get their own
//! [`NodeKind`]; everything else is [`NodeKind::Other`], which keeps the
//! shape of the tree without its detail. Anonymous tokens are not stored.

use sprout_core::{ImportDescriptor, Language, ParameterDescriptor};

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A decorator applied to a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    /// Expression text without the leading `@`.
    pub text: String,
    /// Set only when the decorator is a bare identifier (`@property`).
    /// Attribute access (`@functools.cache`) and calls (`@retry(3)`) have none.
    pub simple_name: Option<String>,
}

/// Payload of a `def` / `async def`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNode {
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: Option<String>,
    pub is_async: bool,
    pub decorators: Vec<Decorator>,
    pub docstring: Option<String>,
    pub source: String,
}

/// Payload of a `class` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    pub bases: Vec<String>,
    pub decorators: Vec<Decorator>,
    pub docstring: Option<String>,
}

/// Closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Module { docstring: Option<String> },
    Function(FunctionNode),
    Class(ClassNode),
    /// Wrapper holding decorators and the definition they apply to.
    Decorated,
    /// Indented statement block (function, class, or compound statement body).
    Block,
    Import(Vec<ImportDescriptor>),
    If,
    Elif,
    For { is_async: bool },
    While,
    ExceptHandler,
    With { is_async: bool },
    /// A binary `and` / `or`. A chain of k operands nests k-1 of these.
    BoolOp,
    Await,
    Yield,
    Other,
}

/// One node of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    /// 1-based.
    pub start_line: u32,
    /// 1-based, inclusive.
    pub end_line: u32,
}

/// Parsed source as a flat arena. Node 0 is the module root and nodes are
/// stored in pre-order, so iteration order is source order.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    language: Language,
    nodes: Vec<SyntaxNode>,
    parents: Vec<Option<NodeId>>,
}

impl SyntaxTree {
    pub(crate) const fn new(language: Language) -> Self {
        Self {
            language,
            nodes: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Append a node and link it under `parent`.
    pub(crate) fn push(
        &mut self,
        kind: NodeKind,
        parent: Option<NodeId>,
        start_line: u32,
        end_line: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            children: Vec::new(),
            start_line,
            end_line,
        });
        self.parents.push(parent);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// The module root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in source order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// The class whose body directly contains definition `id`, looking
    /// through a single decorator wrapper.
    #[must_use]
    pub fn enclosing_class_body(&self, id: NodeId) -> Option<NodeId> {
        let mut parent = self.parent(id)?;
        if matches!(self.node(parent).kind, NodeKind::Decorated) {
            parent = self.parent(parent)?;
        }
        if !matches!(self.node(parent).kind, NodeKind::Block) {
            return None;
        }
        let owner = self.parent(parent)?;
        matches!(self.node(owner).kind, NodeKind::Class(_)).then_some(owner)
    }
}
