//! Completion candidates per reference kind.
//!
//! Same traversals as resolution, but enumerating every reachable
//! declaration instead of filtering to name matches. Builtin-internal
//! `$`-prefixed type names are hidden; the globals they back (`msg`,
//! `block`, ...) come through under their own names.

use crate::base::Name;
use crate::project::Project;
use crate::sema::{hierarchy, resolve, scope, ty};
use crate::syntax::{DeclKind, Node, NodeRef};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Contract,
    Function,
    Variable,
    Field,
    Modifier,
    Struct,
    Enum,
    EnumValue,
    Event,
}

impl CompletionKind {
    fn from_decl(kind: DeclKind) -> CompletionKind {
        match kind {
            DeclKind::Contract | DeclKind::Library | DeclKind::Interface => {
                CompletionKind::Contract
            }
            DeclKind::Function | DeclKind::Constructor => CompletionKind::Function,
            DeclKind::StateVariable | DeclKind::LocalVariable | DeclKind::Parameter => {
                CompletionKind::Variable
            }
            DeclKind::Field => CompletionKind::Field,
            DeclKind::Modifier => CompletionKind::Modifier,
            DeclKind::Struct => CompletionKind::Struct,
            DeclKind::Enum => CompletionKind::Enum,
            DeclKind::EnumValue => CompletionKind::EnumValue,
            DeclKind::Event => CompletionKind::Event,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Name,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (declared type, or declaration kind).
    pub detail: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<Name>, kind: CompletionKind) -> Self {
        CompletionItem {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Render a declaration as a completion item. Unnamed declarations and
/// builtin-internal names produce nothing.
fn item_for_decl(project: &Project, decl: NodeRef) -> Option<CompletionItem> {
    let name = project.name_of(decl)?.clone();
    if name.starts_with('$') {
        return None;
    }
    let kind = project.decl_kind(decl)?;
    let source = project.source(decl.file);
    let detail = match source.node(decl.node) {
        Node::StateVariableDeclaration { type_name, .. }
        | Node::VariableDeclarationStatement { type_name, .. }
        | Node::Parameter { type_name, .. } => source.node_text(*type_name).to_string(),
        _ => kind.display().to_string(),
    };
    Some(CompletionItem::new(name, CompletionKind::from_decl(kind)).with_detail(detail))
}

fn items_for_decls(project: &Project, decls: Vec<NodeRef>) -> Vec<CompletionItem> {
    decls
        .into_iter()
        .filter_map(|decl| item_for_decl(project, decl))
        .collect()
}

/// Type names legal at this position: the enclosing contract's (and its
/// ancestors') structs and enums, then every importable type.
pub fn complete_type_name(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    let mut decls = Vec::new();
    let source = project.source(occurrence.file);
    if let Some(contract) = source.enclosing_contract(occurrence.node) {
        let contract = NodeRef::new(occurrence.file, contract);
        let mut chain = vec![contract];
        chain.extend(hierarchy::collect_supers(project, contract));
        for owner in chain {
            decls.extend(hierarchy::members(project, owner).into_iter().filter(
                |&member| {
                    matches!(
                        project.node(member),
                        Node::StructDefinition { .. } | Node::EnumDefinition { .. }
                    )
                },
            ));
        }
    }
    decls.extend(
        scope::visible_decls(project, occurrence.file)
            .into_iter()
            .filter(|&decl| matches!(project.node(decl), Node::ContractDefinition { .. })),
    );
    items_for_decls(project, decls)
}

/// Everything in expression scope: locals, parameters, state variables
/// (own and inherited), file-level declarations, imports, builtin globals.
pub fn complete_var_literal(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    items_for_decls(project, resolve::all_vars_in_scope(project, occurrence))
}

/// Members of the type left of the dot, own members first.
pub fn complete_member_access(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    let Node::MemberAccess { object, .. } = project.node(occurrence) else {
        return Vec::new();
    };
    let object_ty = ty::infer_expr_type(project, NodeRef::new(occurrence.file, *object));
    items_for_decls(project, resolve::all_members(project, &object_ty))
}

/// Modifiers invocable here: declared by the enclosing contract or any of
/// its ancestors.
pub fn complete_modifier(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    let source = project.source(occurrence.file);
    let Some(contract) = source.enclosing_contract(occurrence.node) else {
        return Vec::new();
    };
    let contract = NodeRef::new(occurrence.file, contract);
    let mut chain = vec![contract];
    chain.extend(hierarchy::collect_supers(project, contract));
    let mut decls = Vec::new();
    for owner in chain {
        decls.extend(
            hierarchy::members(project, owner)
                .into_iter()
                .filter(|&member| matches!(project.node(member), Node::ModifierDefinition { .. })),
        );
    }
    items_for_decls(project, decls)
}

/// Completions in callee position, shaped by the callee expression.
pub fn complete_call(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    let source = project.source(occurrence.file);
    let Node::FunctionCall { callee, .. } = source.node(occurrence.node) else {
        return Vec::new();
    };
    let callee = NodeRef::new(occurrence.file, *callee);
    match project.node(callee) {
        Node::Identifier { .. } => complete_var_literal(project, callee),
        Node::MemberAccess { .. } => complete_member_access(project, callee),
        _ => Vec::new(),
    }
}

/// Contract types constructible with `new`.
pub fn complete_new(project: &Project, occurrence: NodeRef) -> Vec<CompletionItem> {
    let decls = scope::visible_decls(project, occurrence.file)
        .into_iter()
        .filter(|&decl| {
            matches!(
                project.node(decl),
                Node::ContractDefinition {
                    kind: crate::syntax::ContractKind::Contract,
                    ..
                }
            )
        })
        .collect();
    items_for_decls(project, decls)
}
