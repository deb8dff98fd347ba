//! The type-directed resolver: one operation per reference kind.
//!
//! Every operation is a total function over a valid tree snapshot. An empty
//! result means "no binding found"; several results mean the reference is
//! genuinely ambiguous and the caller decides how to present that. Malformed
//! structure (unnamed declarations, cyclic inheritance) is filtered or
//! bounded, never a panic.

use tracing::trace;

use crate::base::Name;
use crate::project::{ADDRESS_CONTRACT, BYTES_CONTRACT, GLOBALS_CONTRACT, Project};
use crate::syntax::{ElementaryType, Node, NodeRef};

use super::ty::{self, Ty};
use super::{hierarchy, scope};

/// How well a call candidate fit the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchQuality {
    /// Arity and every argument type line up with the declared signature.
    Exact,
    /// Only the name matched; returned when no candidate matched exactly,
    /// so "name known, types wrong" stays navigable instead of collapsing
    /// to unresolved.
    NameOnly,
}

/// One candidate from function-call resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedCall {
    pub decl: NodeRef,
    pub quality: MatchQuality,
}

// ============================================================================
// TYPE NAMES
// ============================================================================

/// Resolve a type-name occurrence: enclosing contract's own and inherited
/// type members first, then file scope, then imports.
pub fn resolve_type_name(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let name = match project.node(occurrence) {
        Node::UserDefinedTypeName { name, .. } => name.clone(),
        Node::InheritanceSpecifier { name, .. } => name.clone(),
        _ => return Vec::new(),
    };
    trace!(%name, "resolve_type_name");

    let source = project.source(occurrence.file);
    if let Some(contract) = source.enclosing_contract(occurrence.node) {
        let contract = NodeRef::new(occurrence.file, contract);
        for owner in contract_chain(project, contract) {
            let matches: Vec<NodeRef> = hierarchy::members(project, owner)
                .into_iter()
                .filter(|&member| {
                    matches!(
                        project.node(member),
                        Node::StructDefinition { .. } | Node::EnumDefinition { .. }
                    ) && project.name_of(member).is_some_and(|n| *n == name)
                })
                .collect();
            if !matches.is_empty() {
                return matches;
            }
        }
    }

    scope::lookup_in_file(project, occurrence.file, &name)
}

// ============================================================================
// VAR LITERALS
// ============================================================================

/// Resolve a bare identifier in expression position.
///
/// Walks outward: enclosing block statements (declaration-before-use),
/// enclosing callable's parameters and named returns, enclosing contract's
/// own and inherited state variables and type members, then file scope,
/// imports, and finally the builtin globals.
pub fn resolve_var_literal(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let source = project.source(occurrence.file);
    let Node::Identifier { name } = source.node(occurrence.node) else {
        return Vec::new();
    };
    trace!(%name, "resolve_var_literal");

    if name == "this" {
        return source
            .enclosing_contract(occurrence.node)
            .map(|contract| vec![NodeRef::new(occurrence.file, contract)])
            .unwrap_or_default();
    }

    let mut out = Vec::new();
    let mut child = occurrence.node;
    let mut ancestor = source.parent(child);
    while let Some(current) = ancestor {
        match source.node(current) {
            Node::Block { statements } => {
                // Only declarations textually before the occurrence count.
                for &stmt in statements {
                    if stmt == child {
                        break;
                    }
                    if matches!(
                        source.node(stmt),
                        Node::VariableDeclarationStatement { name: n, .. } if n == name
                    ) {
                        out.push(NodeRef::new(occurrence.file, stmt));
                    }
                }
            }
            Node::FunctionDefinition {
                params, returns, ..
            } => {
                push_named_params(source, occurrence.file, params, name, &mut out);
                push_named_params(source, occurrence.file, returns, name, &mut out);
            }
            Node::ConstructorDefinition { params, .. }
            | Node::ModifierDefinition { params, .. } => {
                push_named_params(source, occurrence.file, params, name, &mut out);
            }
            Node::ContractDefinition { .. } => {
                let contract = NodeRef::new(occurrence.file, current);
                for owner in contract_chain(project, contract) {
                    for member in hierarchy::members(project, owner) {
                        let relevant = matches!(
                            project.node(member),
                            Node::StateVariableDeclaration { .. }
                                | Node::StructDefinition { .. }
                                | Node::EnumDefinition { .. }
                        );
                        if relevant && project.name_of(member).is_some_and(|n| n == name) {
                            out.push(member);
                        }
                    }
                }
            }
            _ => {}
        }
        child = current;
        ancestor = source.parent(current);
    }

    out.extend(scope::lookup_in_file(project, occurrence.file, name));
    out.extend(builtin_globals(project, name));
    out
}

fn push_named_params(
    source: &crate::syntax::SourceFile,
    file: crate::base::FileId,
    params: &[crate::syntax::NodeId],
    name: &Name,
    out: &mut Vec<NodeRef>,
) {
    for &param in params {
        if matches!(
            source.node(param),
            Node::Parameter { name: Some(n), .. } if n == name
        ) {
            out.push(NodeRef::new(file, param));
        }
    }
}

// ============================================================================
// MEMBER ACCESS
// ============================================================================

/// Resolve `object.member` against the static type of `object`.
///
/// For contract types the walk is self-then-ancestors with first match
/// winning, so an own member shadows an inherited one of the same name.
pub fn resolve_member_access(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let Node::MemberAccess { object, member, .. } = project.node(occurrence) else {
        return Vec::new();
    };
    let object_ty = ty::infer_expr_type(project, NodeRef::new(occurrence.file, *object));
    trace!(member = %member, ?object_ty, "resolve_member_access");
    members_named(project, &object_ty, member)
}

/// All members of `ty` with the given name, nearest declaring owner first.
fn members_named(project: &Project, ty: &Ty, name: &Name) -> Vec<NodeRef> {
    match ty {
        Ty::Struct(decl) => struct_fields(project, *decl)
            .into_iter()
            .filter(|&field| project.name_of(field).is_some_and(|n| n == name))
            .collect(),
        Ty::Enum(decl) => enum_variants(project, *decl)
            .into_iter()
            .filter(|&variant| project.name_of(variant).is_some_and(|n| n == name))
            .collect(),
        _ => {
            for owner in member_chain(project, ty) {
                let matches: Vec<NodeRef> = hierarchy::members(project, owner)
                    .into_iter()
                    .filter(|&member| project.name_of(member).is_some_and(|n| n == name))
                    .collect();
                if !matches.is_empty() {
                    return matches;
                }
            }
            Vec::new()
        }
    }
}

/// The contracts whose members a value of `ty` exposes, in lookup order.
fn member_chain(project: &Project, ty: &Ty) -> Vec<NodeRef> {
    match ty {
        Ty::Contract(contract) => contract_chain(project, *contract),
        Ty::Elementary(ElementaryType::Address) => {
            builtin_contract(project, ADDRESS_CONTRACT).into_iter().collect()
        }
        Ty::Elementary(ElementaryType::Bytes) | Ty::Elementary(ElementaryType::FixedBytes(_)) => {
            builtin_contract(project, BYTES_CONTRACT).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

fn contract_chain(project: &Project, contract: NodeRef) -> Vec<NodeRef> {
    let mut chain = vec![contract];
    chain.extend(hierarchy::collect_supers(project, contract));
    chain
}

fn struct_fields(project: &Project, decl: NodeRef) -> Vec<NodeRef> {
    match project.node(decl) {
        Node::StructDefinition { fields, .. } => fields
            .iter()
            .map(|&id| NodeRef::new(decl.file, id))
            .collect(),
        _ => Vec::new(),
    }
}

fn enum_variants(project: &Project, decl: NodeRef) -> Vec<NodeRef> {
    match project.node(decl) {
        Node::EnumDefinition { variants, .. } => variants
            .iter()
            .map(|&id| NodeRef::new(decl.file, id))
            .collect(),
        _ => Vec::new(),
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// Resolve a modifier invocation on a function header.
///
/// Two phases: gather modifier definitions with the right name anywhere
/// reachable, then keep only those whose declaring contract is the enclosing
/// contract or one of its ancestors. Modifiers are not overload-resolved.
pub fn resolve_modifier(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let source = project.source(occurrence.file);
    let Node::ModifierInvocation { name, .. } = source.node(occurrence.node) else {
        return Vec::new();
    };
    trace!(%name, "resolve_modifier");
    let Some(contract) = source.enclosing_contract(occurrence.node) else {
        return Vec::new();
    };
    let contract = NodeRef::new(occurrence.file, contract);
    let allowed = hierarchy::self_and_super_names(project, contract);

    let mut out = Vec::new();
    for file in scope::visible_files(project, occurrence.file) {
        for candidate_contract in project.source(file).contracts() {
            let owner = NodeRef::new(file, candidate_contract);
            let Some(owner_name) = project.name_of(owner) else {
                continue;
            };
            if !allowed.contains(owner_name) {
                continue;
            }
            for member in hierarchy::members(project, owner) {
                if matches!(project.node(member), Node::ModifierDefinition { .. })
                    && project.name_of(member).is_some_and(|n| n == name)
                {
                    out.push(member);
                }
            }
        }
    }
    out
}

// ============================================================================
// FUNCTION CALLS
// ============================================================================

/// Resolve a call occurrence, dispatching on its shape:
/// bare `f(...)`, `super.f(...)`, qualified `expr.f(...)`, or `new C(...)`.
pub fn resolve_function_call(project: &Project, call: NodeRef) -> Vec<ResolvedCall> {
    let source = project.source(call.file);
    let Node::FunctionCall { callee, .. } = source.node(call.node) else {
        return Vec::new();
    };
    match source.node(*callee) {
        Node::Identifier { .. } => {
            let context = match source.enclosing_contract(call.node) {
                Some(contract) => Ty::Contract(NodeRef::new(call.file, contract)),
                None => Ty::Unknown,
            };
            resolve_function(project, &context, call, false)
        }
        Node::MemberAccess { object, .. } => {
            let is_super = matches!(
                source.node(*object),
                Node::Identifier { name } if name == "super"
            );
            if is_super {
                match source.enclosing_contract(call.node) {
                    Some(contract) => {
                        let context = Ty::Contract(NodeRef::new(call.file, contract));
                        resolve_function(project, &context, call, true)
                    }
                    None => Vec::new(),
                }
            } else {
                let context = ty::infer_expr_type(project, NodeRef::new(call.file, *object));
                resolve_function(project, &context, call, false)
            }
        }
        Node::NewExpression { .. } => {
            let constructors = resolve_new_expression(project, NodeRef::new(call.file, *callee));
            filter_by_signature(project, call, constructors)
        }
        _ => Vec::new(),
    }
}

/// The overload resolver.
///
/// Gathers name-matching callables reachable from `context` (ancestors only
/// when `is_super`; self plus ancestors otherwise; file-level free functions
/// as well for unqualified calls), then filters by arity and per-argument
/// assignability. When nothing survives the filter, the unfiltered
/// name-matching set is returned as [`MatchQuality::NameOnly`].
pub fn resolve_function(
    project: &Project,
    context: &Ty,
    call: NodeRef,
    is_super: bool,
) -> Vec<ResolvedCall> {
    let source = project.source(call.file);
    let Node::FunctionCall { callee, .. } = source.node(call.node) else {
        return Vec::new();
    };
    let (name, bare) = match source.node(*callee) {
        Node::Identifier { name } => (name.clone(), true),
        Node::MemberAccess { member, .. } => (member.clone(), false),
        _ => return Vec::new(),
    };
    trace!(%name, is_super, "resolve_function");

    let mut candidates: Vec<NodeRef> = Vec::new();
    let chain = match context {
        Ty::Contract(contract) if is_super => hierarchy::collect_supers(project, *contract),
        _ => member_chain(project, context),
    };
    for owner in chain {
        for member in hierarchy::members(project, owner) {
            let callable = matches!(
                project.node(member),
                Node::FunctionDefinition { .. } | Node::EventDefinition { .. }
            );
            if callable && project.name_of(member).is_some_and(|n| *n == name) {
                candidates.push(member);
            }
        }
    }

    if bare && !is_super {
        // Free functions at file scope and through imports.
        candidates.extend(
            scope::lookup_in_file(project, call.file, &name)
                .into_iter()
                .filter(|&decl| matches!(project.node(decl), Node::FunctionDefinition { .. })),
        );
    }

    filter_by_signature(project, call, candidates)
}

/// Resolve `new C` to C's constructors; a contract without any resolves to
/// the contract declaration itself.
pub fn resolve_new_expression(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let Node::NewExpression { type_name } = project.node(occurrence) else {
        return Vec::new();
    };
    let types = resolve_type_name(project, NodeRef::new(occurrence.file, *type_name));
    types
        .into_iter()
        .filter(|&decl| matches!(project.node(decl), Node::ContractDefinition { .. }))
        .flat_map(|contract| {
            let constructors = hierarchy::find_constructors(project, contract);
            if constructors.is_empty() {
                vec![contract]
            } else {
                constructors
            }
        })
        .collect()
}

/// Apply the arity + argument-type filter; fall back to the unfiltered set.
fn filter_by_signature(
    project: &Project,
    call: NodeRef,
    candidates: Vec<NodeRef>,
) -> Vec<ResolvedCall> {
    let source = project.source(call.file);
    let Node::FunctionCall { args, .. } = source.node(call.node) else {
        return Vec::new();
    };
    let arg_types: Vec<Ty> = args
        .iter()
        .map(|&arg| ty::infer_expr_type(project, NodeRef::new(call.file, arg)))
        .collect();

    let exact: Vec<NodeRef> = candidates
        .iter()
        .copied()
        .filter(|&candidate| signature_matches(project, candidate, &arg_types))
        .collect();

    if exact.is_empty() {
        candidates
            .into_iter()
            .map(|decl| ResolvedCall {
                decl,
                quality: MatchQuality::NameOnly,
            })
            .collect()
    } else {
        exact
            .into_iter()
            .map(|decl| ResolvedCall {
                decl,
                quality: MatchQuality::Exact,
            })
            .collect()
    }
}

/// A candidate matches only as a whole: arity equal and every argument
/// assignable to its parameter. No partial credit.
fn signature_matches(project: &Project, candidate: NodeRef, arg_types: &[Ty]) -> bool {
    let params = callable_params(project, candidate);
    if params.len() != arg_types.len() {
        return false;
    }
    params.iter().zip(arg_types).all(|(&param, arg)| {
        let param_ty = ty::decl_type(project, NodeRef::new(candidate.file, param));
        param_ty.is_assignable_from(project, arg)
    })
}

fn callable_params(project: &Project, candidate: NodeRef) -> Vec<crate::syntax::NodeId> {
    match project.node(candidate) {
        Node::FunctionDefinition { params, .. }
        | Node::ConstructorDefinition { params, .. }
        | Node::ModifierDefinition { params, .. }
        | Node::EventDefinition { params, .. } => params.clone(),
        // `new C()` on a constructor-less contract: zero parameters.
        Node::ContractDefinition { .. } => Vec::new(),
        _ => Vec::new(),
    }
}

// ============================================================================
// BUILTINS
// ============================================================================

/// A contract in the builtins file, by name.
pub(crate) fn builtin_contract(project: &Project, contract_name: &str) -> Option<NodeRef> {
    let file = project.builtins_file();
    project
        .source(file)
        .contracts()
        .map(|id| NodeRef::new(file, id))
        .find(|&contract| project.name_of(contract).is_some_and(|n| n == contract_name))
}

/// The magic globals (`msg`, `block`, ...) matching `name`.
fn builtin_globals(project: &Project, name: &Name) -> Vec<NodeRef> {
    let Some(globals) = builtin_contract(project, GLOBALS_CONTRACT) else {
        return Vec::new();
    };
    hierarchy::members(project, globals)
        .into_iter()
        .filter(|&member| {
            matches!(project.node(member), Node::StateVariableDeclaration { .. })
                && project.name_of(member).is_some_and(|n| n == name)
        })
        .collect()
}

/// Everything a value of `ty` exposes, for completion (no name filter,
/// all owners in the chain).
pub(crate) fn all_members(project: &Project, ty: &Ty) -> Vec<NodeRef> {
    match ty {
        Ty::Struct(decl) => struct_fields(project, *decl),
        Ty::Enum(decl) => enum_variants(project, *decl),
        _ => member_chain(project, ty)
            .into_iter()
            .flat_map(|owner| hierarchy::members(project, owner))
            .filter(|&member| project.name_of(member).is_some())
            .collect(),
    }
}

/// Everything in var-literal scope at `occurrence`, for completion.
pub(crate) fn all_vars_in_scope(project: &Project, occurrence: NodeRef) -> Vec<NodeRef> {
    let source = project.source(occurrence.file);
    let mut out = Vec::new();
    let mut child = occurrence.node;
    let mut ancestor = source.parent(child);
    while let Some(current) = ancestor {
        match source.node(current) {
            Node::Block { statements } => {
                for &stmt in statements {
                    if stmt == child {
                        break;
                    }
                    if matches!(
                        source.node(stmt),
                        Node::VariableDeclarationStatement { .. }
                    ) {
                        out.push(NodeRef::new(occurrence.file, stmt));
                    }
                }
            }
            Node::FunctionDefinition {
                params, returns, ..
            } => {
                push_all_named_params(source, occurrence.file, params, &mut out);
                push_all_named_params(source, occurrence.file, returns, &mut out);
            }
            Node::ConstructorDefinition { params, .. }
            | Node::ModifierDefinition { params, .. } => {
                push_all_named_params(source, occurrence.file, params, &mut out);
            }
            Node::ContractDefinition { .. } => {
                let contract = NodeRef::new(occurrence.file, current);
                for owner in contract_chain(project, contract) {
                    for member in hierarchy::members(project, owner) {
                        if matches!(
                            project.node(member),
                            Node::StateVariableDeclaration { .. }
                                | Node::StructDefinition { .. }
                                | Node::EnumDefinition { .. }
                        ) && project.name_of(member).is_some()
                        {
                            out.push(member);
                        }
                    }
                }
            }
            _ => {}
        }
        child = current;
        ancestor = source.parent(current);
    }
    out.extend(scope::visible_decls(project, occurrence.file));
    if let Some(globals) = builtin_contract(project, GLOBALS_CONTRACT) {
        out.extend(
            hierarchy::members(project, globals)
                .into_iter()
                .filter(|&m| matches!(project.node(m), Node::StateVariableDeclaration { .. })),
        );
    }
    out
}

fn push_all_named_params(
    source: &crate::syntax::SourceFile,
    file: crate::base::FileId,
    params: &[crate::syntax::NodeId],
    out: &mut Vec<NodeRef>,
) {
    for &param in params {
        if matches!(source.node(param), Node::Parameter { name: Some(_), .. }) {
            out.push(NodeRef::new(file, param));
        }
    }
}
