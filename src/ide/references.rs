//! Reference wrappers: one variant per occurrence kind, a uniform
//! resolve/variants contract.

use crate::base::{FileId, TextRange, TextSize};
use crate::project::Project;
use crate::sema::resolve;
use crate::syntax::{Node, NodeRef};

use super::completion::{self, CompletionItem};

/// A reference occurrence bound to its resolution strategy.
///
/// Flat dispatch: each variant maps to exactly one resolver operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    /// A user-defined type name in type position.
    TypeName(NodeRef),
    /// A bare identifier in expression position.
    VarLiteral(NodeRef),
    /// `object.member`.
    MemberAccess(NodeRef),
    /// A modifier invocation on a function header.
    Modifier(NodeRef),
    /// A call of any shape (bare, super, qualified, constructor).
    FunctionCall(NodeRef),
    /// `new C`.
    New(NodeRef),
}

impl Reference {
    /// Bind a node to its resolution strategy, if it is a reference
    /// occurrence at all.
    pub fn classify(project: &Project, node: NodeRef) -> Option<Reference> {
        let reference = match project.node(node) {
            Node::UserDefinedTypeName { .. } | Node::InheritanceSpecifier { .. } => {
                Reference::TypeName(node)
            }
            Node::Identifier { .. } => Reference::VarLiteral(node),
            Node::MemberAccess { .. } => Reference::MemberAccess(node),
            Node::ModifierInvocation { .. } => Reference::Modifier(node),
            Node::FunctionCall { .. } => Reference::FunctionCall(node),
            Node::NewExpression { .. } => Reference::New(node),
            _ => return None,
        };
        Some(reference)
    }

    pub fn node(&self) -> NodeRef {
        match *self {
            Reference::TypeName(node)
            | Reference::VarLiteral(node)
            | Reference::MemberAccess(node)
            | Reference::Modifier(node)
            | Reference::FunctionCall(node)
            | Reference::New(node) => node,
        }
    }

    /// The declarations this occurrence can bind to, in visibility order.
    /// Empty means unresolved; several means genuinely ambiguous.
    pub fn resolve(&self, project: &Project) -> Vec<NodeRef> {
        match *self {
            Reference::TypeName(node) => resolve::resolve_type_name(project, node),
            Reference::VarLiteral(node) => resolve::resolve_var_literal(project, node),
            Reference::MemberAccess(node) => resolve::resolve_member_access(project, node),
            Reference::Modifier(node) => resolve::resolve_modifier(project, node),
            Reference::FunctionCall(node) => resolve::resolve_function_call(project, node)
                .into_iter()
                .map(|result| result.decl)
                .collect(),
            Reference::New(node) => resolve::resolve_new_expression(project, node),
        }
    }

    /// Every declaration that would be a legal completion at this position.
    pub fn variants(&self, project: &Project) -> Vec<CompletionItem> {
        match *self {
            Reference::TypeName(node) => completion::complete_type_name(project, node),
            Reference::VarLiteral(node) => completion::complete_var_literal(project, node),
            Reference::MemberAccess(node) => completion::complete_member_access(project, node),
            Reference::Modifier(node) => completion::complete_modifier(project, node),
            Reference::FunctionCall(node) => completion::complete_call(project, node),
            Reference::New(node) => completion::complete_new(project, node),
        }
    }

    /// The sub-range of the occurrence to highlight: the identifier token,
    /// not the whole expression.
    pub fn range_in_element(&self, project: &Project) -> TextRange {
        let node = self.node();
        let source = project.source(node.file);
        match source.node(node.node) {
            Node::UserDefinedTypeName { name_range, .. }
            | Node::InheritanceSpecifier { name_range, .. } => *name_range,
            Node::MemberAccess { member_range, .. } => *member_range,
            Node::ModifierInvocation { name_range, .. } => *name_range,
            Node::FunctionCall { callee, .. } => match source.node(*callee) {
                Node::MemberAccess { member_range, .. } => *member_range,
                _ => source.range(*callee),
            },
            Node::NewExpression { type_name } => match source.node(*type_name) {
                Node::UserDefinedTypeName { name_range, .. } => *name_range,
                _ => source.range(*type_name),
            },
            _ => source.range(node.node),
        }
    }
}

/// Find the reference under a cursor offset.
///
/// The deepest node wins, except that an identifier or member access in
/// callee position reports the enclosing call (so navigation gets overload
/// resolution), and a type name under `new` reports the constructor
/// reference.
pub fn reference_at_offset(project: &Project, file: FileId, offset: TextSize) -> Option<Reference> {
    let source = project.source(file);
    let deepest = source.node_at_offset(offset)?;
    for candidate in std::iter::once(deepest).chain(source.ancestors(deepest)) {
        let parent = source.parent(candidate);
        match source.node(candidate) {
            Node::Identifier { .. } | Node::MemberAccess { .. } => {
                if let Some(parent) = parent {
                    if let Node::FunctionCall { callee, .. } = source.node(parent) {
                        if *callee == candidate {
                            return Reference::classify(project, NodeRef::new(file, parent));
                        }
                    }
                }
                return Reference::classify(project, NodeRef::new(file, candidate));
            }
            Node::UserDefinedTypeName { .. } => {
                if let Some(parent) = parent {
                    if matches!(source.node(parent), Node::NewExpression { .. }) {
                        return Reference::classify(project, NodeRef::new(file, parent));
                    }
                }
                return Reference::classify(project, NodeRef::new(file, candidate));
            }
            Node::ModifierInvocation { .. }
            | Node::FunctionCall { .. }
            | Node::NewExpression { .. }
            | Node::InheritanceSpecifier { .. } => {
                return Reference::classify(project, NodeRef::new(file, candidate));
            }
            _ => {}
        }
    }
    None
}
