//! Typed node payloads.

use crate::base::{Name, TextRange};

/// Index of a node within its file's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which flavor of contract-like definition a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    Contract,
    Library,
    Interface,
}

/// One entry of a selective import: `import {Name as Alias} from "path";`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSymbol {
    pub name: Name,
    pub alias: Option<Name>,
    pub range: TextRange,
}

impl ImportSymbol {
    /// The name this symbol is visible under in the importing file.
    pub fn local_name(&self) -> &Name {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// A value-type keyword: `uint256`, `bool`, `address`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementaryType {
    Bool,
    Address,
    String,
    /// Dynamically-sized `bytes`.
    Bytes,
    /// `bytes1` .. `bytes32`.
    FixedBytes(u8),
    /// `uint8` .. `uint256`; bare `uint` is `Uint(256)`.
    Uint(u16),
    /// `int8` .. `int256`; bare `int` is `Int(256)`.
    Int(u16),
}

impl ElementaryType {
    /// Map a type keyword to its descriptor, or `None` for a user-defined name.
    pub fn parse(text: &str) -> Option<ElementaryType> {
        match text {
            "bool" => return Some(ElementaryType::Bool),
            "address" => return Some(ElementaryType::Address),
            "string" => return Some(ElementaryType::String),
            "bytes" => return Some(ElementaryType::Bytes),
            "uint" => return Some(ElementaryType::Uint(256)),
            "int" => return Some(ElementaryType::Int(256)),
            _ => {}
        }
        if let Some(rest) = text.strip_prefix("uint") {
            let bits: u16 = rest.parse().ok()?;
            if bits >= 8 && bits <= 256 && bits % 8 == 0 {
                return Some(ElementaryType::Uint(bits));
            }
        } else if let Some(rest) = text.strip_prefix("int") {
            let bits: u16 = rest.parse().ok()?;
            if bits >= 8 && bits <= 256 && bits % 8 == 0 {
                return Some(ElementaryType::Int(bits));
            }
        } else if let Some(rest) = text.strip_prefix("bytes") {
            let size: u8 = rest.parse().ok()?;
            if size >= 1 && size <= 32 {
                return Some(ElementaryType::FixedBytes(size));
            }
        }
        None
    }
}

impl std::fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementaryType::Bool => write!(f, "bool"),
            ElementaryType::Address => write!(f, "address"),
            ElementaryType::String => write!(f, "string"),
            ElementaryType::Bytes => write!(f, "bytes"),
            ElementaryType::FixedBytes(n) => write!(f, "bytes{n}"),
            ElementaryType::Uint(n) => write!(f, "uint{n}"),
            ElementaryType::Int(n) => write!(f, "int{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Assign,
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

/// The payload of a syntax node.
///
/// Child nodes are referenced by [`NodeId`]; the role of each child is the
/// field it sits in (the "expression left of a member access" is
/// `MemberAccess::object`, and so on).
#[derive(Clone, Debug)]
pub enum Node {
    SourceUnit {
        items: Vec<NodeId>,
    },
    PragmaDirective,
    ImportDirective {
        /// The import path string, quotes stripped.
        path: Name,
        /// Empty for a plain import; otherwise the selected symbols.
        symbols: Vec<ImportSymbol>,
    },
    ContractDefinition {
        kind: ContractKind,
        /// `None` when the source is malformed; such contracts never match.
        name: Option<Name>,
        name_range: Option<TextRange>,
        supers: Vec<NodeId>,
        members: Vec<NodeId>,
    },
    /// One entry of an `is` clause. Constructor arguments, if present, are
    /// consumed but not stored; only the ancestor name matters here.
    InheritanceSpecifier {
        name: Name,
        name_range: TextRange,
    },
    StateVariableDeclaration {
        type_name: NodeId,
        name: Name,
        name_range: TextRange,
        initializer: Option<NodeId>,
    },
    FunctionDefinition {
        /// `None` for the legacy anonymous fallback form `function () {}`.
        name: Option<Name>,
        name_range: Option<TextRange>,
        params: Vec<NodeId>,
        returns: Vec<NodeId>,
        modifiers: Vec<NodeId>,
        body: Option<NodeId>,
    },
    ConstructorDefinition {
        params: Vec<NodeId>,
        modifiers: Vec<NodeId>,
        body: Option<NodeId>,
    },
    ModifierDefinition {
        name: Name,
        name_range: TextRange,
        params: Vec<NodeId>,
        body: Option<NodeId>,
    },
    StructDefinition {
        name: Name,
        name_range: TextRange,
        fields: Vec<NodeId>,
    },
    EnumDefinition {
        name: Name,
        name_range: TextRange,
        variants: Vec<NodeId>,
    },
    EnumValue {
        name: Name,
        name_range: TextRange,
    },
    EventDefinition {
        name: Name,
        name_range: TextRange,
        params: Vec<NodeId>,
    },
    /// A function/event/modifier parameter, a named return value, or a struct
    /// field (the parent node disambiguates).
    Parameter {
        type_name: NodeId,
        name: Option<Name>,
        name_range: Option<TextRange>,
    },
    /// `onlyOwner` or `onlyOwner(arg, ...)` on a function header.
    ModifierInvocation {
        name: Name,
        name_range: TextRange,
        args: Vec<NodeId>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    VariableDeclarationStatement {
        type_name: NodeId,
        name: Name,
        name_range: TextRange,
        initializer: Option<NodeId>,
    },
    ExpressionStatement {
        expr: NodeId,
    },
    ReturnStatement {
        expr: Option<NodeId>,
    },
    EmitStatement {
        call: NodeId,
    },
    IfStatement {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    ElementaryTypeName {
        ty: ElementaryType,
    },
    UserDefinedTypeName {
        name: Name,
        name_range: TextRange,
    },
    /// A bare identifier in expression position (a "var literal").
    Identifier {
        name: Name,
    },
    MemberAccess {
        object: NodeId,
        member: Name,
        member_range: TextRange,
    },
    FunctionCall {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    NewExpression {
        type_name: NodeId,
    },
    BinaryExpression {
        op: BinaryOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    UnaryExpression {
        op: UnaryOp,
        operand: NodeId,
    },
    NumberLiteral,
    StringLiteral,
    BoolLiteral {
        value: bool,
    },
    /// Placeholder produced by error recovery; never matches anything.
    Error,
}

impl Node {
    /// The ids of this node's children, in field order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Node::SourceUnit { items } => out.extend(items),
            Node::ContractDefinition {
                supers, members, ..
            } => {
                out.extend(supers);
                out.extend(members);
            }
            Node::StateVariableDeclaration {
                type_name,
                initializer,
                ..
            } => {
                out.push(*type_name);
                out.extend(initializer);
            }
            Node::FunctionDefinition {
                params,
                returns,
                modifiers,
                body,
                ..
            } => {
                out.extend(params);
                out.extend(modifiers);
                out.extend(returns);
                out.extend(body);
            }
            Node::ConstructorDefinition {
                params,
                modifiers,
                body,
            } => {
                out.extend(params);
                out.extend(modifiers);
                out.extend(body);
            }
            Node::ModifierDefinition { params, body, .. } => {
                out.extend(params);
                out.extend(body);
            }
            Node::StructDefinition { fields, .. } => out.extend(fields),
            Node::EnumDefinition { variants, .. } => out.extend(variants),
            Node::EventDefinition { params, .. } => out.extend(params),
            Node::Parameter { type_name, .. } => out.push(*type_name),
            Node::ModifierInvocation { args, .. } => out.extend(args),
            Node::Block { statements } => out.extend(statements),
            Node::VariableDeclarationStatement {
                type_name,
                initializer,
                ..
            } => {
                out.push(*type_name);
                out.extend(initializer);
            }
            Node::ExpressionStatement { expr } => out.push(*expr),
            Node::ReturnStatement { expr } => out.extend(expr),
            Node::EmitStatement { call } => out.push(*call),
            Node::IfStatement {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(*condition);
                out.push(*then_branch);
                out.extend(else_branch);
            }
            Node::MemberAccess { object, .. } => out.push(*object),
            Node::FunctionCall { callee, args } => {
                out.push(*callee);
                out.extend(args);
            }
            Node::NewExpression { type_name } => out.push(*type_name),
            Node::BinaryExpression { lhs, rhs, .. } => {
                out.push(*lhs);
                out.push(*rhs);
            }
            Node::UnaryExpression { operand, .. } => out.push(*operand),
            Node::PragmaDirective
            | Node::ImportDirective { .. }
            | Node::InheritanceSpecifier { .. }
            | Node::EnumValue { .. }
            | Node::ElementaryTypeName { .. }
            | Node::UserDefinedTypeName { .. }
            | Node::Identifier { .. }
            | Node::NumberLiteral
            | Node::StringLiteral
            | Node::BoolLiteral { .. }
            | Node::Error => {}
        }
        out
    }
}

/// Classification of a declaration node, for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Contract,
    Library,
    Interface,
    Function,
    Constructor,
    Modifier,
    StateVariable,
    LocalVariable,
    Parameter,
    Field,
    Struct,
    Enum,
    EnumValue,
    Event,
}

#[cfg(test)]
mod tests {
    use super::ElementaryType;
    use rstest::rstest;

    #[rstest]
    #[case("bool", Some(ElementaryType::Bool))]
    #[case("address", Some(ElementaryType::Address))]
    #[case("uint", Some(ElementaryType::Uint(256)))]
    #[case("uint8", Some(ElementaryType::Uint(8)))]
    #[case("int128", Some(ElementaryType::Int(128)))]
    #[case("bytes", Some(ElementaryType::Bytes))]
    #[case("bytes32", Some(ElementaryType::FixedBytes(32)))]
    #[case("bytes33", None)]
    #[case("uint7", None)]
    #[case("uint512", None)]
    #[case("Foo", None)]
    #[case("uintx", None)]
    fn elementary_type_parsing(#[case] text: &str, #[case] expected: Option<ElementaryType>) {
        assert_eq!(ElementaryType::parse(text), expected);
    }
}

impl DeclKind {
    pub fn display(self) -> &'static str {
        match self {
            DeclKind::Contract => "contract",
            DeclKind::Library => "library",
            DeclKind::Interface => "interface",
            DeclKind::Function => "function",
            DeclKind::Constructor => "constructor",
            DeclKind::Modifier => "modifier",
            DeclKind::StateVariable => "state variable",
            DeclKind::LocalVariable => "local variable",
            DeclKind::Parameter => "parameter",
            DeclKind::Field => "field",
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::EnumValue => "enum value",
            DeclKind::Event => "event",
        }
    }
}
