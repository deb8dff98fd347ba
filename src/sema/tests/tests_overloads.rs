//! Overload filtering: arity, argument types, and the unfiltered fallback.

use super::{call_at, owner_name, project_with};
use crate::sema::resolve::{self, MatchQuality};
use crate::syntax::Node;

#[test]
fn arity_selects_among_overloads() {
    let project = project_with(&[(
        "a.sol",
        "contract C { \
           function f(uint a) public {} \
           function f(uint a, uint b) public {} \
           function g() public { f(1, 2); } \
         }",
    )]);
    let call = call_at(&project, "a.sol", "f(1, 2)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
    let Node::FunctionDefinition { params, .. } = project.node(resolved[0].decl) else {
        panic!("expected function");
    };
    assert_eq!(params.len(), 2);
}

#[test]
fn argument_types_select_among_same_arity_overloads() {
    let project = project_with(&[(
        "a.sol",
        "contract C { \
           function f(uint a) public {} \
           function f(address a) public {} \
           function g() public { f(msg.sender); } \
         }",
    )]);
    let call = call_at(&project, "a.sol", "f(msg.sender)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
    let Node::FunctionDefinition { params, .. } = project.node(resolved[0].decl) else {
        panic!("expected function");
    };
    let source = project.source(resolved[0].decl.file);
    let Node::Parameter { type_name, .. } = source.node(params[0]) else {
        panic!("expected parameter");
    };
    assert_eq!(source.node_text(*type_name), "address");
}

#[test]
fn failed_match_falls_back_to_name_only_set() {
    let project = project_with(&[(
        "a.sol",
        "contract C { \
           function f(uint a) public {} \
           function g() public { f(true); f(1, 2, 3); } \
         }",
    )]);

    // Right arity, wrong type: the name-matching set comes back unfiltered.
    let call = call_at(&project, "a.sol", "f(true)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::NameOnly);

    // Wrong arity: same fallback.
    let call = call_at(&project, "a.sol", "f(1, 2, 3)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::NameOnly);
}

#[test]
fn number_literals_adapt_to_any_numeric_width() {
    let project = project_with(&[(
        "a.sol",
        "contract C { function f(uint8 a) public {} function g() public { f(1); } }",
    )]);
    let call = call_at(&project, "a.sol", "f(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
}

#[test]
fn integer_widening_is_one_directional() {
    let project = project_with(&[(
        "a.sol",
        "contract C { \
           function f(uint8 a) public {} \
           function g(uint256 x, uint8 y) public { f(x); f(y); } \
         }",
    )]);

    // uint256 does not fit a uint8 parameter.
    let call = call_at(&project, "a.sol", "f(x)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved[0].quality, MatchQuality::NameOnly);

    // uint8 fits exactly.
    let call = call_at(&project, "a.sol", "f(y)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
}

#[test]
fn derived_contract_argument_matches_ancestor_parameter() {
    let project = project_with(&[(
        "a.sol",
        "contract A {} contract B is A {} \
         contract C { \
           function take(A a) public {} \
           function g() public { B b = new B(); take(b); } \
         }",
    )]);
    let call = call_at(&project, "a.sol", "take(b)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
}

#[test]
fn emit_resolves_to_the_event() {
    let project = project_with(&[(
        "a.sol",
        "contract C { event Done(uint v); function f() public { emit Done(1); } }",
    )]);
    let call = call_at(&project, "a.sol", "Done(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
    assert!(matches!(
        project.node(resolved[0].decl),
        Node::EventDefinition { .. }
    ));
}

#[test]
fn bare_calls_reach_free_functions_through_imports() {
    let project = project_with(&[
        ("lib.sol", "function helper(uint a) public {}"),
        (
            "a.sol",
            r#"import "./lib.sol"; contract C { function f() public { helper(1); } }"#,
        ),
    ]);
    let call = call_at(&project, "a.sol", "helper(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
    assert_eq!(resolved[0].decl.file, project.file_id("lib.sol").unwrap());
}

#[test]
fn constructor_calls_filter_like_other_calls() {
    let project = project_with(&[(
        "a.sol",
        "contract D { constructor(uint a) public {} } \
         contract C { function f() public { new D(1); new D(true); } }",
    )]);

    let call = call_at(&project, "a.sol", "D(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);

    let call = call_at(&project, "a.sol", "D(true)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::NameOnly);
}

#[test]
fn overloads_gather_across_the_hierarchy() {
    let project = project_with(&[(
        "a.sol",
        "contract A { function f(uint a) public {} } \
         contract B is A { \
           function f(address a) public {} \
           function g() public { f(1); } \
         }",
    )]);
    let call = call_at(&project, "a.sol", "f(1)", 0);
    let resolved = resolve::resolve_function_call(&project, call);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].quality, MatchQuality::Exact);
    assert_eq!(owner_name(&project, resolved[0].decl).as_deref(), Some("A"));
}
