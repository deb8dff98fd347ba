//! The contract hierarchy model: linearized ancestors and constructors.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::project::Project;
use crate::syntax::{Node, NodeRef};

use super::scope;

/// The linearized ancestors of `contract`, nearest first; the contract
/// itself is excluded.
///
/// Order: direct ancestors as written in the `is` clause, then each
/// ancestor's own ancestors in turn. The seen-set guarantees a contract
/// appears at most once (diamond inheritance) and that a cyclic `is`
/// relation terminates as if the cycle member had no further ancestors.
pub fn collect_supers(project: &Project, contract: NodeRef) -> Vec<NodeRef> {
    let mut seen = FxHashSet::default();
    seen.insert(contract);
    let mut supers = Vec::new();
    let mut pending = vec![contract];
    while let Some(current) = pending.pop() {
        let directs = direct_supers(project, current, &mut seen);
        supers.extend(&directs);
        // LIFO so the first direct ancestor's own ancestors come before the
        // second's.
        for &ancestor in directs.iter().rev() {
            pending.push(ancestor);
        }
    }
    trace!(count = supers.len(), "collected supers");
    supers
}

/// Resolve the `is` clause of one contract, skipping anything already seen.
fn direct_supers(
    project: &Project,
    contract: NodeRef,
    seen: &mut FxHashSet<NodeRef>,
) -> Vec<NodeRef> {
    let Node::ContractDefinition {
        supers: specifiers, ..
    } = project.node(contract)
    else {
        return Vec::new();
    };
    let source = project.source(contract.file);
    let mut out = Vec::new();
    for &specifier in specifiers {
        let Node::InheritanceSpecifier { name, .. } = source.node(specifier) else {
            continue;
        };
        let resolved = scope::lookup_in_file(project, contract.file, name);
        let Some(ancestor) = resolved
            .into_iter()
            .find(|&decl| matches!(project.node(decl), Node::ContractDefinition { .. }))
        else {
            continue;
        };
        if seen.insert(ancestor) {
            out.push(ancestor);
        }
    }
    out
}

/// Member declarations of a contract, in source order.
pub fn members(project: &Project, contract: NodeRef) -> Vec<NodeRef> {
    match project.node(contract) {
        Node::ContractDefinition { members, .. } => members
            .iter()
            .map(|&id| NodeRef::new(contract.file, id))
            .collect(),
        _ => Vec::new(),
    }
}

/// The constructors of a contract.
///
/// Explicit `constructor(...)` declarations always win; only when none
/// exist does the legacy form apply: any function sharing the contract's
/// own name.
pub fn find_constructors(project: &Project, contract: NodeRef) -> Vec<NodeRef> {
    let Node::ContractDefinition { name, members, .. } = project.node(contract) else {
        return Vec::new();
    };
    let source = project.source(contract.file);
    let explicit: Vec<NodeRef> = members
        .iter()
        .copied()
        .filter(|&id| matches!(source.node(id), Node::ConstructorDefinition { .. }))
        .map(|id| NodeRef::new(contract.file, id))
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }
    let Some(contract_name) = name else {
        return Vec::new();
    };
    members
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                source.node(id),
                Node::FunctionDefinition { name: Some(n), .. } if n == contract_name
            )
        })
        .map(|id| NodeRef::new(contract.file, id))
        .collect()
}

/// The names of a contract and all its ancestors, for ownership filters.
pub fn self_and_super_names(project: &Project, contract: NodeRef) -> Vec<crate::base::Name> {
    let mut names = Vec::new();
    if let Some(name) = project.name_of(contract) {
        names.push(name.clone());
    }
    for ancestor in collect_supers(project, contract) {
        if let Some(name) = project.name_of(ancestor) {
            names.push(name.clone());
        }
    }
    names
}
