//! Static type descriptors and expression type inference.
//!
//! Only as much typing as overload disambiguation needs: no checking, no
//! coercion diagnostics. Anything the inference cannot see through becomes
//! [`Ty::Unknown`], which is compatible with everything so that missing
//! information never excludes a candidate.

use crate::project::Project;
use crate::syntax::{ElementaryType, Node, NodeRef};

use super::resolve;
use super::{MatchQuality, hierarchy};

/// The static type of an expression or declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ty {
    Elementary(ElementaryType),
    /// A contract instance, or the contract itself for static access.
    Contract(NodeRef),
    Struct(NodeRef),
    Enum(NodeRef),
    /// An untyped integer literal; adapts to any numeric parameter.
    NumberLiteral,
    Unknown,
}

impl Ty {
    /// Whether an argument of type `source` is acceptable where `self` is
    /// declared.
    ///
    /// `Unknown` is compatible in both directions: an uninferrable argument
    /// must not exclude a candidate, and an unresolvable parameter type must
    /// not exclude a call.
    pub fn is_assignable_from(&self, project: &Project, source: &Ty) -> bool {
        use ElementaryType::*;
        match (self, source) {
            (Ty::Unknown, _) | (_, Ty::Unknown) => true,
            (target, source) if target == source => true,
            (Ty::Elementary(target), Ty::NumberLiteral) => {
                matches!(target, Uint(_) | Int(_) | FixedBytes(_))
            }
            (Ty::Elementary(Address), Ty::Contract(_)) => true,
            (Ty::Elementary(target), Ty::Elementary(source)) => match (target, source) {
                (Uint(t), Uint(s)) => s <= t,
                (Int(t), Int(s)) => s <= t,
                (Int(t), Uint(s)) => s < t,
                (FixedBytes(t), FixedBytes(s)) => s <= t,
                _ => false,
            },
            // A contract is acceptable where any of its ancestors is.
            (Ty::Contract(target), Ty::Contract(source)) => {
                hierarchy::collect_supers(project, *source).contains(target)
            }
            _ => false,
        }
    }
}

/// The type a declaration has when referenced as a value.
pub fn decl_type(project: &Project, decl: NodeRef) -> Ty {
    match project.node(decl) {
        Node::StateVariableDeclaration { type_name, .. }
        | Node::VariableDeclarationStatement { type_name, .. }
        | Node::Parameter { type_name, .. } => {
            from_type_name(project, NodeRef::new(decl.file, *type_name))
        }
        Node::ContractDefinition { .. } => Ty::Contract(decl),
        Node::StructDefinition { .. } => Ty::Struct(decl),
        Node::EnumDefinition { .. } => Ty::Enum(decl),
        Node::EnumValue { .. } => match project.source(decl.file).parent(decl.node) {
            Some(parent) => Ty::Enum(NodeRef::new(decl.file, parent)),
            None => Ty::Unknown,
        },
        _ => Ty::Unknown,
    }
}

/// Resolve a type-name node to a descriptor.
pub fn from_type_name(project: &Project, type_name: NodeRef) -> Ty {
    match project.node(type_name) {
        Node::ElementaryTypeName { ty } => Ty::Elementary(*ty),
        Node::UserDefinedTypeName { .. } => {
            let resolved = resolve::resolve_type_name(project, type_name);
            match resolved.first() {
                Some(&decl) => match project.node(decl) {
                    Node::ContractDefinition { .. } => Ty::Contract(decl),
                    Node::StructDefinition { .. } => Ty::Struct(decl),
                    Node::EnumDefinition { .. } => Ty::Enum(decl),
                    _ => Ty::Unknown,
                },
                None => Ty::Unknown,
            }
        }
        _ => Ty::Unknown,
    }
}

/// Infer the static type of an expression node.
pub fn infer_expr_type(project: &Project, expr: NodeRef) -> Ty {
    use crate::syntax::BinaryOp::*;
    let source = project.source(expr.file);
    match source.node(expr.node) {
        Node::NumberLiteral => Ty::NumberLiteral,
        Node::StringLiteral => Ty::Elementary(ElementaryType::String),
        Node::BoolLiteral { .. } => Ty::Elementary(ElementaryType::Bool),
        Node::Identifier { name } => {
            if name == "this" {
                return match source.enclosing_contract(expr.node) {
                    Some(contract) => Ty::Contract(NodeRef::new(expr.file, contract)),
                    None => Ty::Unknown,
                };
            }
            match resolve::resolve_var_literal(project, expr).first() {
                Some(&decl) => decl_type(project, decl),
                None => Ty::Unknown,
            }
        }
        Node::MemberAccess { .. } => match resolve::resolve_member_access(project, expr).first() {
            Some(&decl) => decl_type(project, decl),
            None => Ty::Unknown,
        },
        Node::FunctionCall { .. } => {
            let resolved = resolve::resolve_function_call(project, expr);
            let best = resolved
                .iter()
                .find(|r| r.quality == MatchQuality::Exact)
                .or_else(|| resolved.first());
            match best {
                Some(result) => call_result_type(project, result.decl),
                None => Ty::Unknown,
            }
        }
        Node::NewExpression { type_name } => {
            from_type_name(project, NodeRef::new(expr.file, *type_name))
        }
        Node::BinaryExpression { op, lhs, .. } => match op {
            Or | And | Eq | NotEq | Lt | Gt | LtEq | GtEq => Ty::Elementary(ElementaryType::Bool),
            Assign | Add | Sub | Mul | Div | Rem => {
                infer_expr_type(project, NodeRef::new(expr.file, *lhs))
            }
        },
        Node::UnaryExpression { op, operand } => match op {
            crate::syntax::UnaryOp::Not => Ty::Elementary(ElementaryType::Bool),
            crate::syntax::UnaryOp::Neg => infer_expr_type(project, NodeRef::new(expr.file, *operand)),
        },
        _ => Ty::Unknown,
    }
}

/// The type a call evaluates to, given what its callee resolved to.
fn call_result_type(project: &Project, decl: NodeRef) -> Ty {
    match project.node(decl) {
        Node::FunctionDefinition { returns, .. } => match returns.first() {
            Some(&ret) => decl_type(project, NodeRef::new(decl.file, ret)),
            None => Ty::Unknown,
        },
        Node::ConstructorDefinition { .. } => match project.source(decl.file).parent(decl.node) {
            Some(contract) => Ty::Contract(NodeRef::new(decl.file, contract)),
            None => Ty::Unknown,
        },
        // `new C()` where C has no explicit constructor.
        Node::ContractDefinition { .. } => Ty::Contract(decl),
        _ => Ty::Unknown,
    }
}
