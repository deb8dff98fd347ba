//! Shared fixtures for the semantic tests.

mod tests_overloads;
mod tests_resolve;

use crate::base::TextSize;
use crate::project::Project;
use crate::syntax::NodeRef;

/// Build a project from (path, source) pairs.
fn project_with(files: &[(&str, &str)]) -> Project {
    let mut project = Project::new();
    for (path, text) in files {
        project.add_source(path, text);
    }
    project
}

/// The deepest node at the `nth` (0-based) occurrence of `needle` in a file.
fn node_at(project: &Project, path: &str, needle: &str, nth: usize) -> NodeRef {
    let file = project.file_id(path).expect("unknown file");
    let source = project.source(file);
    let offset = nth_offset(source.text(), needle, nth);
    let node = source.node_at_offset(offset).expect("no node at offset");
    NodeRef::new(file, node)
}

/// A top-level contract by name.
fn contract_named(project: &Project, path: &str, name: &str) -> NodeRef {
    let file = project.file_id(path).expect("unknown file");
    let source = project.source(file);
    source
        .contracts()
        .map(|id| NodeRef::new(file, id))
        .find(|&c| project.name_of(c).is_some_and(|n| n == name))
        .unwrap_or_else(|| panic!("no contract named {name}"))
}

/// The call node whose callee sits at the `nth` occurrence of `needle`
/// (climbs out of the callee expression to the enclosing call).
fn call_at(project: &Project, path: &str, needle: &str, nth: usize) -> NodeRef {
    let node = node_at(project, path, needle, nth);
    let source = project.source(node.file);
    if matches!(source.node(node.node), crate::syntax::Node::FunctionCall { .. }) {
        return node;
    }
    source
        .ancestors(node.node)
        .find(|&a| matches!(source.node(a), crate::syntax::Node::FunctionCall { .. }))
        .map(|a| NodeRef::new(node.file, a))
        .unwrap_or(node)
}

/// Name of the contract that owns a declaration.
fn owner_name(project: &Project, decl: NodeRef) -> Option<String> {
    let source = project.source(decl.file);
    let contract = source.enclosing_contract(decl.node)?;
    source
        .decl_name(contract)
        .map(|name| name.as_str().to_owned())
}

fn nth_offset(text: &str, needle: &str, nth: usize) -> TextSize {
    let mut from = 0;
    let mut count = 0;
    while let Some(pos) = text[from..].find(needle) {
        let abs = from + pos;
        if count == nth {
            return TextSize::new(abs as u32);
        }
        count += 1;
        from = abs + needle.len();
    }
    panic!("needle {needle:?} occurrence {nth} not found");
}
