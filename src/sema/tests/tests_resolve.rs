//! The five resolver operations, kind by kind.

use super::{call_at, node_at, owner_name, project_with};
use crate::sema::resolve;
use crate::syntax::{DeclKind, Node};

#[test]
fn member_access_walks_self_then_linearization() {
    let project = project_with(&[(
        "a.sol",
        "contract A { uint m; } contract B { uint m; } \
         contract C is A, B { function f() public { this.m = 1; } } \
         contract D is A, B { uint m; function g() public { this.m = 1; } }",
    )]);

    // C has no own `m`: A's wins over B's by linearization order.
    let access = node_at(&project, "a.sol", ".m = 1", 0);
    let resolved = resolve::resolve_member_access(&project, access);
    assert_eq!(resolved.len(), 1);
    assert_eq!(owner_name(&project, resolved[0]).as_deref(), Some("A"));

    // D declares its own `m`: it shadows every inherited one.
    let access = node_at(&project, "a.sol", ".m = 1", 1);
    let resolved = resolve::resolve_member_access(&project, access);
    assert_eq!(resolved.len(), 1);
    assert_eq!(owner_name(&project, resolved[0]).as_deref(), Some("D"));
}

#[test]
fn super_call_never_returns_own_override() {
    let project = project_with(&[(
        "a.sol",
        "contract A { function f() public {} } \
         contract B is A { function f() public { super.f(); } }",
    )]);
    let call = call_at(&project, "a.sol", ".f()", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(
        owner_name(&project, resolved[0].decl).as_deref(),
        Some("A"),
        "super must skip B's own f"
    );
}

#[test]
fn bare_call_reaches_inherited_functions() {
    let project = project_with(&[(
        "a.sol",
        "contract A { function g(uint a) public {} } \
         contract B is A { function f() public { g(1); } }",
    )]);
    let call = call_at(&project, "a.sol", "g(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, resolve::MatchQuality::Exact);
    assert_eq!(owner_name(&project, resolved[0].decl).as_deref(), Some("A"));
}

#[test]
fn this_resolves_to_the_enclosing_contract() {
    let project = project_with(&[(
        "a.sol",
        "contract C { function f() public { this; } }",
    )]);
    let this = node_at(&project, "a.sol", "this;", 0);
    let resolved = resolve::resolve_var_literal(&project, this);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Contract));
    assert_eq!(project.name_of(resolved[0]).unwrap(), "C");
}

#[test]
fn parameters_shadow_state_variables() {
    let project = project_with(&[(
        "a.sol",
        "contract C { uint x; function f(uint x) public { x = 1; } }",
    )]);
    let occurrence = node_at(&project, "a.sol", "x = 1", 0);
    let resolved = resolve::resolve_var_literal(&project, occurrence);
    assert_eq!(resolved.len(), 2, "parameter and state variable both match");
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Parameter));
    assert_eq!(project.decl_kind(resolved[1]), Some(DeclKind::StateVariable));
}

#[test]
fn inherited_state_variables_are_in_scope() {
    let project = project_with(&[(
        "a.sol",
        "contract A { uint total; } \
         contract B is A { function f() public { total = 1; } }",
    )]);
    let occurrence = node_at(&project, "a.sol", "total = 1", 0);
    let resolved = resolve::resolve_var_literal(&project, occurrence);
    assert_eq!(resolved.len(), 1);
    assert_eq!(owner_name(&project, resolved[0]).as_deref(), Some("A"));
}

#[test]
fn msg_sender_resolves_through_builtins() {
    let project = project_with(&[(
        "a.sol",
        "contract C { function f() public { msg.sender; } }",
    )]);

    let msg = node_at(&project, "a.sol", "msg", 0);
    let resolved = resolve::resolve_var_literal(&project, msg);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].file, project.builtins_file());
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::StateVariable));

    let access = node_at(&project, "a.sol", ".sender", 0);
    let resolved = resolve::resolve_member_access(&project, access);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.name_of(resolved[0]).unwrap(), "sender");
    assert_eq!(resolved[0].file, project.builtins_file());
}

#[test]
fn address_values_expose_intrinsic_members() {
    let project = project_with(&[(
        "a.sol",
        "contract C { function f(address to) public { to.transfer(1); } }",
    )]);
    let call = call_at(&project, "a.sol", ".transfer", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, resolve::MatchQuality::Exact);
    assert_eq!(resolved[0].decl.file, project.builtins_file());
}

#[test]
fn modifier_resolution_filters_by_ownership() {
    let project = project_with(&[(
        "a.sol",
        "contract Other { modifier onlyOwner() { _; } } \
         contract A { modifier onlyOwner() { _; } } \
         contract B is A { function f() public onlyOwner {} }",
    )]);
    let invocation = node_at(&project, "a.sol", "onlyOwner {}", 0);
    assert!(matches!(
        project.node(invocation),
        Node::ModifierInvocation { .. }
    ));
    let resolved = resolve::resolve_modifier(&project, invocation);
    assert_eq!(resolved.len(), 1, "Other's modifier must be filtered out");
    assert_eq!(owner_name(&project, resolved[0]).as_deref(), Some("A"));
}

#[test]
fn type_names_see_inherited_nested_types() {
    let project = project_with(&[(
        "a.sol",
        "contract A { struct S { uint x; } } \
         contract B is A { function f() public { S memory s; } }",
    )]);
    let type_name = node_at(&project, "a.sol", "S memory", 0);
    let resolved = resolve::resolve_type_name(&project, type_name);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Struct));
    assert_eq!(owner_name(&project, resolved[0]).as_deref(), Some("A"));
}

#[test]
fn struct_field_access_resolves() {
    let project = project_with(&[(
        "a.sol",
        "contract C { struct Point { uint x; uint y; } Point origin; \
         function f() public { origin.y = 1; } }",
    )]);
    let access = node_at(&project, "a.sol", ".y = 1", 0);
    let resolved = resolve::resolve_member_access(&project, access);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Field));
    assert_eq!(project.name_of(resolved[0]).unwrap(), "y");
}

#[test]
fn enum_variant_access_resolves() {
    let project = project_with(&[(
        "a.sol",
        "contract C { enum Suit { Hearts, Spades } \
         function f() public { Suit s = Suit.Hearts; } }",
    )]);
    let access = node_at(&project, "a.sol", ".Hearts", 0);
    let resolved = resolve::resolve_member_access(&project, access);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::EnumValue));
}

#[test]
fn new_expression_resolves_constructors() {
    let project = project_with(&[(
        "a.sol",
        "contract D { constructor(uint a) public {} } contract E {} \
         contract C { function f() public { new D(1); new E(); } }",
    )]);

    let new_d = node_at(&project, "a.sol", "new D", 0);
    let resolved = resolve::resolve_new_expression(&project, new_d);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Constructor));

    // No constructor: the contract declaration itself is the target.
    let new_e = node_at(&project, "a.sol", "new E", 0);
    let resolved = resolve::resolve_new_expression(&project, new_e);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Contract));
}

#[test]
fn unresolved_names_yield_empty_not_error() {
    let project = project_with(&[(
        "a.sol",
        "contract C { function f() public { ghost = 1; ghost2(); } }",
    )]);
    let ghost = node_at(&project, "a.sol", "ghost =", 0);
    assert!(resolve::resolve_var_literal(&project, ghost).is_empty());
    let call = call_at(&project, "a.sol", "ghost2()", 0);
    assert!(resolve::resolve_function_call(&project, call).is_empty());
}

#[test]
fn resolution_is_idempotent_on_an_unchanged_snapshot() {
    let project = project_with(&[(
        "a.sol",
        "contract A { uint m; } contract B is A { function f() public { m = 1; } }",
    )]);
    let occurrence = node_at(&project, "a.sol", "m = 1", 0);
    let first = resolve::resolve_var_literal(&project, occurrence);
    let second = resolve::resolve_var_literal(&project, occurrence);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
