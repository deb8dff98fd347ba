//! The Solidity syntax tree.
//!
//! One arena per file: [`SourceFile`] owns a `Vec` of nodes, [`NodeId`]
//! indexes into it. Every node carries a typed payload ([`Node`]), a parent
//! link, and a byte [`TextRange`](crate::base::TextRange) into the file's
//! text. The tree is immutable after parsing; semantic layers only ever hold
//! `&SourceFile` and `NodeId`s, never copies of nodes.

mod node;
mod tree;

pub use node::{
    BinaryOp, ContractKind, DeclKind, ElementaryType, ImportSymbol, Node, NodeId, UnaryOp,
};
pub use tree::{NodeData, ParseError, SourceFile, TreeBuilder};

use crate::base::FileId;

/// A node handle that is meaningful across files: a file plus a node in it.
///
/// Resolution results are `NodeRef`s pointing at declaration nodes; reference
/// occurrences are `NodeRef`s pointing at use sites. The handle carries no
/// identity beyond the tree's own node identity, so it is only valid for the
/// project snapshot it was produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub file: FileId,
    pub node: NodeId,
}

impl NodeRef {
    pub fn new(file: FileId, node: NodeId) -> Self {
        NodeRef { file, node }
    }
}
