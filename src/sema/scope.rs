//! The scope & import index: which file-level declarations a position sees.
//!
//! Lookup order is fixed: a file's own top-level declarations always win;
//! only when none match is each import directive walked in declaration
//! order. Plain imports contribute the whole target file and re-export its
//! own imports; selective imports contribute only the chosen symbols, under
//! their alias. Every file is visited at most once per lookup, so import
//! cycles terminate.

use rustc_hash::FxHashSet;

use crate::base::FileId;
use crate::project::Project;
use crate::syntax::{Node, NodeRef};

/// Named top-level declarations of a file, in source order.
pub fn top_level_decls(project: &Project, file: FileId) -> Vec<NodeRef> {
    let source = project.source(file);
    source
        .items()
        .iter()
        .copied()
        .filter(|&id| {
            matches!(
                source.node(id),
                Node::ContractDefinition { .. } | Node::FunctionDefinition { .. }
            )
        })
        .map(|id| NodeRef::new(file, id))
        .collect()
}

/// Look `name` up in `file`'s own scope, then through its imports.
///
/// Returns every match in visibility order; empty means unresolved, which
/// callers treat as a normal outcome.
pub fn lookup_in_file(project: &Project, file: FileId, name: &str) -> Vec<NodeRef> {
    let own: Vec<NodeRef> = top_level_decls(project, file)
        .into_iter()
        .filter(|&decl| project.name_of(decl).is_some_and(|n| n == name))
        .collect();
    if !own.is_empty() {
        return own;
    }
    let mut visited = FxHashSet::default();
    visited.insert(file);
    let mut out = Vec::new();
    lookup_in_imports(project, file, name, &mut visited, &mut out);
    out
}

fn lookup_in_imports(
    project: &Project,
    file: FileId,
    name: &str,
    visited: &mut FxHashSet<FileId>,
    out: &mut Vec<NodeRef>,
) {
    let source = project.source(file);
    for &item in source.items() {
        let Node::ImportDirective { path, symbols } = source.node(item) else {
            continue;
        };
        let Some(target) = project.resolve_import(file, path) else {
            continue;
        };
        let first_visit = visited.insert(target);
        if symbols.is_empty() {
            // Plain import: the whole target file, then its own imports.
            if first_visit {
                out.extend(
                    top_level_decls(project, target)
                        .into_iter()
                        .filter(|&decl| project.name_of(decl).is_some_and(|n| n == name)),
                );
                lookup_in_imports(project, target, name, visited, out);
            }
        } else {
            // Selective import: only the chosen symbols, under their alias.
            for symbol in symbols {
                if symbol.local_name() != name {
                    continue;
                }
                let mut found: Vec<NodeRef> = top_level_decls(project, target)
                    .into_iter()
                    .filter(|&decl| project.name_of(decl) == Some(&symbol.name))
                    .collect();
                if found.is_empty() && first_visit {
                    // Re-exported symbol: follow the target's own imports.
                    lookup_in_imports(project, target, &symbol.name, visited, &mut found);
                }
                out.append(&mut found);
            }
        }
    }
}

/// Every file reachable from `file` through imports, `file` itself first.
///
/// Selectivity is ignored here; this feeds searches that apply their own
/// ownership filter afterwards (modifier resolution) and completion.
pub fn visible_files(project: &Project, file: FileId) -> Vec<FileId> {
    let mut visited = FxHashSet::default();
    visited.insert(file);
    let mut out = vec![file];
    let mut cursor = 0;
    while cursor < out.len() {
        let current = out[cursor];
        cursor += 1;
        let source = project.source(current);
        for &item in source.items() {
            let Node::ImportDirective { path, .. } = source.node(item) else {
                continue;
            };
            if let Some(target) = project.resolve_import(current, path) {
                if visited.insert(target) {
                    out.push(target);
                }
            }
        }
    }
    out
}

/// Every top-level declaration visible from `file`: its own, plus imported
/// ones (whole files for plain imports, selected symbols for selective
/// ones). Used for completion, where no name filter applies.
pub fn visible_decls(project: &Project, file: FileId) -> Vec<NodeRef> {
    let mut visited = FxHashSet::default();
    visited.insert(file);
    let mut out = top_level_decls(project, file);
    collect_imported_decls(project, file, &mut visited, &mut out);
    out
}

fn collect_imported_decls(
    project: &Project,
    file: FileId,
    visited: &mut FxHashSet<FileId>,
    out: &mut Vec<NodeRef>,
) {
    let source = project.source(file);
    for &item in source.items() {
        let Node::ImportDirective { path, symbols } = source.node(item) else {
            continue;
        };
        let Some(target) = project.resolve_import(file, path) else {
            continue;
        };
        if symbols.is_empty() {
            if visited.insert(target) {
                out.extend(top_level_decls(project, target));
                collect_imported_decls(project, target, visited, out);
            }
        } else {
            for symbol in symbols {
                out.extend(
                    top_level_decls(project, target)
                        .into_iter()
                        .filter(|&decl| project.name_of(decl) == Some(&symbol.name)),
                );
            }
        }
    }
}
