//! The per-file node arena and navigation queries.

use crate::base::{FileId, Name, TextRange, TextSize};

use super::node::{ContractKind, DeclKind, Node, NodeId};

/// A recoverable parse problem. Parsing never fails outright; it records
/// errors and keeps building a best-effort tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        ParseError {
            message: message.into(),
            range,
        }
    }
}

/// A node plus its tree bookkeeping.
#[derive(Clone, Debug)]
pub struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub range: TextRange,
    pub node: Node,
}

/// An immutable parsed file: source text plus the node arena.
#[derive(Clone, Debug)]
pub struct SourceFile {
    file: FileId,
    text: String,
    nodes: Vec<NodeData>,
    root: NodeId,
    errors: Vec<ParseError>,
}

impl SourceFile {
    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()].node
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// The source text covered by a node.
    pub fn node_text(&self, id: NodeId) -> &str {
        &self.text.as_str()[self.range(id)]
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).child_ids()
    }

    /// The chain of ancestors, nearest first; does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&n| self.parent(n))
    }

    /// Nearest enclosing contract/library/interface definition.
    pub fn enclosing_contract(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| matches!(self.node(n), Node::ContractDefinition { .. }))
    }

    /// Nearest enclosing callable (function, constructor, or modifier).
    pub fn enclosing_callable(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id).chain(self.ancestors(id)).find(|&n| {
            matches!(
                self.node(n),
                Node::FunctionDefinition { .. }
                    | Node::ConstructorDefinition { .. }
                    | Node::ModifierDefinition { .. }
            )
        })
    }

    /// The deepest node whose range contains `offset`.
    pub fn node_at_offset(&self, offset: TextSize) -> Option<NodeId> {
        let root = self.root;
        if !self.range(root).contains(offset) {
            return None;
        }
        let mut current = root;
        'descend: loop {
            for child in self.children(current) {
                if self.range(child).contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// The name a declaration node introduces, if it is a named declaration.
    ///
    /// Nodes that should carry a name but don't (malformed input) yield
    /// `None` here, which is how the resolver skips them.
    pub fn decl_name(&self, id: NodeId) -> Option<&Name> {
        match self.node(id) {
            Node::ContractDefinition { name, .. } | Node::FunctionDefinition { name, .. } => {
                name.as_ref()
            }
            Node::StateVariableDeclaration { name, .. }
            | Node::ModifierDefinition { name, .. }
            | Node::StructDefinition { name, .. }
            | Node::EnumDefinition { name, .. }
            | Node::EnumValue { name, .. }
            | Node::EventDefinition { name, .. }
            | Node::VariableDeclarationStatement { name, .. } => Some(name),
            Node::Parameter { name, .. } => name.as_ref(),
            _ => None,
        }
    }

    /// The range of the name token of a declaration, falling back to the
    /// whole node for unnamed declarations (constructors).
    pub fn decl_name_range(&self, id: NodeId) -> TextRange {
        match self.node(id) {
            Node::ContractDefinition { name_range, .. }
            | Node::FunctionDefinition { name_range, .. }
            | Node::Parameter { name_range, .. } => name_range.unwrap_or_else(|| self.range(id)),
            Node::StateVariableDeclaration { name_range, .. }
            | Node::ModifierDefinition { name_range, .. }
            | Node::StructDefinition { name_range, .. }
            | Node::EnumDefinition { name_range, .. }
            | Node::EnumValue { name_range, .. }
            | Node::EventDefinition { name_range, .. }
            | Node::VariableDeclarationStatement { name_range, .. } => *name_range,
            _ => self.range(id),
        }
    }

    /// Classify a declaration node for presentation.
    pub fn decl_kind(&self, id: NodeId) -> Option<DeclKind> {
        let kind = match self.node(id) {
            Node::ContractDefinition { kind, .. } => match kind {
                ContractKind::Contract => DeclKind::Contract,
                ContractKind::Library => DeclKind::Library,
                ContractKind::Interface => DeclKind::Interface,
            },
            Node::FunctionDefinition { .. } => DeclKind::Function,
            Node::ConstructorDefinition { .. } => DeclKind::Constructor,
            Node::ModifierDefinition { .. } => DeclKind::Modifier,
            Node::StateVariableDeclaration { .. } => DeclKind::StateVariable,
            Node::VariableDeclarationStatement { .. } => DeclKind::LocalVariable,
            Node::StructDefinition { .. } => DeclKind::Struct,
            Node::EnumDefinition { .. } => DeclKind::Enum,
            Node::EnumValue { .. } => DeclKind::EnumValue,
            Node::EventDefinition { .. } => DeclKind::Event,
            Node::Parameter { .. } => {
                // A Parameter under a struct is a field.
                match self.parent(id).map(|p| self.node(p)) {
                    Some(Node::StructDefinition { .. }) => DeclKind::Field,
                    _ => DeclKind::Parameter,
                }
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Top-level items of the file, in source order.
    pub fn items(&self) -> &[NodeId] {
        match self.node(self.root) {
            Node::SourceUnit { items } => items,
            _ => &[],
        }
    }

    /// Top-level contract/library/interface definitions, in source order.
    pub fn contracts(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items()
            .iter()
            .copied()
            .filter(|&id| matches!(self.node(id), Node::ContractDefinition { .. }))
    }
}

/// Accumulates nodes during parsing; [`TreeBuilder::finish`] seals the arena
/// and computes parent links.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder::default()
    }

    pub fn alloc(&mut self, node: Node, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            parent: None,
            range,
            node,
        });
        id
    }

    pub fn error(&mut self, message: impl Into<String>, range: TextRange) {
        self.errors.push(ParseError::new(message, range));
    }

    /// Range of an already-allocated node (the parser widens ranges of
    /// composite expressions from their children).
    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id.index()].range
    }

    pub fn finish(self, file: FileId, text: String, root: NodeId) -> SourceFile {
        let mut source = SourceFile {
            file,
            text,
            nodes: self.nodes,
            root,
            errors: self.errors,
        };
        // Parent links are derived from the child lists in one pass.
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            for child in source.node(id).child_ids() {
                source.nodes[child.index()].parent = Some(id);
                stack.push(child);
            }
        }
        source
    }
}
