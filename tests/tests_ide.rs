//! End-to-end IDE behavior: classify a reference under a cursor, resolve it
//! to declaration sites, enumerate completion variants.

use solsema::ide::{Reference, goto_definition, reference_at_offset};
use solsema::syntax::DeclKind;
use solsema::{Project, TextSize};

fn offset_of(text: &str, needle: &str) -> TextSize {
    TextSize::new(text.find(needle).expect("needle not found") as u32)
}

#[test]
fn goto_definition_across_files() {
    let token = "contract Token { function mint(address to, uint amount) public {} }";
    let main = r#"import "./token.sol"; contract Vault is Token { function f(address to) public { mint(to, 1); } }"#;

    let mut project = Project::new();
    project.add_source("token.sol", token);
    let file = project.add_source("main.sol", main);

    let result = goto_definition(&project, file, offset_of(main, "mint(to,"));
    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.file, project.file_id("token.sol").unwrap());
    assert_eq!(target.name.as_deref(), Some("mint"));
    assert_eq!(target.kind, Some(DeclKind::Function));
    assert_eq!(&token[target.range], "mint");
}

#[test]
fn goto_definition_on_an_inheritance_specifier() {
    let text = "contract Base {} contract C is Base {}";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let offset = TextSize::new((text.find("is Base").unwrap() + 3) as u32);
    let result = goto_definition(&project, file, offset);
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].kind, Some(DeclKind::Contract));
    assert_eq!(&text[result.targets[0].range], "Base");
}

#[test]
fn goto_definition_on_a_type_annotation() {
    let text = "contract Token {} contract C { Token token; }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let result = goto_definition(&project, file, offset_of(text, "Token token"));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].name.as_deref(), Some("Token"));
}

#[test]
fn member_reference_highlights_only_the_member_token() {
    let text = "contract C { uint x; function f() public { this.x = 1; } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let reference = reference_at_offset(&project, file, offset_of(text, "x = 1")).unwrap();
    assert!(matches!(reference, Reference::MemberAccess(_)));
    let range = reference.range_in_element(&project);
    assert_eq!(&text[range], "x");

    let resolved = reference.resolve(&project);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::StateVariable));
}

#[test]
fn callee_position_reports_the_call_reference() {
    let text = "contract C { function g(uint a) public {} function f() public { g(1); } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let reference = reference_at_offset(&project, file, offset_of(text, "g(1)")).unwrap();
    assert!(matches!(reference, Reference::FunctionCall(_)));
    let resolved = reference.resolve(&project);
    assert_eq!(resolved.len(), 1);
    assert_eq!(project.decl_kind(resolved[0]), Some(DeclKind::Function));
}

#[test]
fn new_expression_navigates_to_the_constructor() {
    let text = "contract D { constructor(uint a) public {} } \
                contract C { function f() public { new D(1); } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let result = goto_definition(&project, file, offset_of(text, "D(1)"));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].kind, Some(DeclKind::Constructor));
}

#[test]
fn unresolved_reference_yields_an_empty_result() {
    let text = "contract C { function f() public { missing(1); } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let result = goto_definition(&project, file, offset_of(text, "missing"));
    assert!(result.is_empty());
}

#[test]
fn member_completion_includes_inherited_members() {
    let text = "contract A { uint total; function inc() public {} } \
                contract B is A { function f() public { this.total = 1; } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let reference = reference_at_offset(&project, file, offset_of(text, "total = 1")).unwrap();
    let labels: Vec<String> = reference
        .variants(&project)
        .into_iter()
        .map(|item| item.label.to_string())
        .collect();
    assert!(labels.contains(&"total".to_owned()), "labels: {labels:?}");
    assert!(labels.contains(&"inc".to_owned()), "labels: {labels:?}");
    assert!(labels.contains(&"f".to_owned()), "own members included too");
}

#[test]
fn identifier_completion_sees_scope_and_globals_but_not_internals() {
    let text = "contract C { uint stored; function f() public { uint count = 0; count = 1; } }";
    let mut project = Project::new();
    let file = project.add_source("a.sol", text);

    let reference = reference_at_offset(&project, file, offset_of(text, "count = 1")).unwrap();
    assert!(matches!(reference, Reference::VarLiteral(_)));
    let labels: Vec<String> = reference
        .variants(&project)
        .into_iter()
        .map(|item| item.label.to_string())
        .collect();
    assert!(labels.contains(&"count".to_owned()));
    assert!(labels.contains(&"stored".to_owned()));
    assert!(labels.contains(&"msg".to_owned()), "magic globals complete");
    assert!(
        labels.iter().all(|label| !label.starts_with('$')),
        "builtin internals must stay hidden: {labels:?}"
    );
}

#[test]
fn project_snapshots_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    // Resolution holds only `&Project`, so concurrent requests against one
    // snapshot are safe by construction.
    assert_send_sync::<Project>();
}

#[test]
fn resolution_survives_a_file_replacement() {
    let mut project = Project::new();
    project.add_source("a.sol", "contract A { uint old; }");
    let text = "contract A { uint fresh; } contract B is A { function f() public { fresh = 1; } }";
    let file = project.add_source("a.sol", text);

    let result = goto_definition(&project, file, offset_of(text, "fresh = 1"));
    assert_eq!(result.targets.len(), 1);
    assert_eq!(result.targets[0].name.as_deref(), Some("fresh"));
}
