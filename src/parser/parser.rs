//! Recursive descent parser for the Solidity subset.
//!
//! Builds a [`SourceFile`] arena from tokens. Error recovery is local: a
//! malformed construct records a [`ParseError`](crate::syntax::ParseError)
//! and parsing continues at the next plausible token.

use crate::base::{FileId, Name, TextRange, TextSize};
use crate::syntax::{
    BinaryOp, ContractKind, ElementaryType, ImportSymbol, Node, NodeId, SourceFile, TreeBuilder,
    UnaryOp,
};

use super::lexer::{Tok, Token, tokenize};

/// Header words that are not modifier invocations.
const HEADER_KEYWORDS: &[&str] = &[
    "public", "private", "internal", "external", "pure", "view", "payable", "constant", "virtual",
    "override", "anonymous", "immutable",
];

/// Data-location words allowed before parameter and variable names.
const LOCATION_KEYWORDS: &[&str] = &["memory", "storage", "calldata", "indexed"];

/// Parse Solidity source into a syntax tree.
pub fn parse(file: FileId, text: &str) -> SourceFile {
    let tokens = tokenize(text);
    let mut parser = Parser {
        text,
        tokens: &tokens,
        pos: 0,
        builder: TreeBuilder::new(),
    };
    let root = parser.parse_source_unit();
    parser.builder.finish(file, text.to_owned(), root)
}

struct Parser<'a> {
    text: &'a str,
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: TreeBuilder,
}

impl<'a> Parser<'a> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at(&self, kind: Tok) -> bool {
        self.current().map(|t| t.kind) == Some(kind)
    }

    fn nth_kind(&self, n: usize) -> Option<Tok> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_range(&self) -> TextRange {
        match self.current() {
            Some(t) => t.range(),
            None => TextRange::empty(TextSize::of(self.text)),
        }
    }

    /// Offset where the next node would start.
    fn start(&self) -> TextSize {
        match self.current() {
            Some(t) => t.offset,
            None => TextSize::of(self.text),
        }
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> TextSize {
        if self.pos == 0 {
            TextSize::new(0)
        } else {
            self.tokens[self.pos - 1].range().end()
        }
    }

    /// Range from a saved start to the last consumed token.
    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.current();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: Tok) -> bool {
        if self.at(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: Tok, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            let range = self.current_range();
            self.builder.error(format!("expected {what}"), range);
            false
        }
    }

    fn expect_ident(&mut self, what: &str) -> Option<(Name, TextRange)> {
        if self.at(Tok::Ident) {
            let token = self.bump()?;
            Some((Name::from(token.text), token.range()))
        } else {
            let range = self.current_range();
            self.builder.error(format!("expected {what}"), range);
            None
        }
    }

    /// Skip a balanced `( ... )` group (used for constructs whose contents
    /// the resolver does not need, like base-constructor arguments).
    fn skip_balanced_parens(&mut self) {
        if !self.at(Tok::LParen) {
            return;
        }
        let mut depth = 0usize;
        while let Some(token) = self.current() {
            match token.kind {
                Tok::LParen => depth += 1,
                Tok::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    // =========================================================================
    // Source unit
    // =========================================================================

    fn parse_source_unit(&mut self) -> NodeId {
        let mut items = Vec::new();
        while !self.at_eof() {
            let before = self.pos;
            match self.current().map(|t| t.kind) {
                Some(Tok::PragmaKw) => items.push(self.parse_pragma()),
                Some(Tok::ImportKw) => items.push(self.parse_import()),
                Some(Tok::ContractKw) | Some(Tok::LibraryKw) | Some(Tok::InterfaceKw) => {
                    items.push(self.parse_contract());
                }
                Some(Tok::FunctionKw) => items.push(self.parse_function()),
                _ => {
                    let range = self.current_range();
                    self.builder.error("unexpected token at file level", range);
                }
            }
            if self.pos == before {
                self.bump();
            }
        }
        let range = TextRange::new(TextSize::new(0), TextSize::of(self.text));
        self.builder.alloc(Node::SourceUnit { items }, range)
    }

    fn parse_pragma(&mut self) -> NodeId {
        let start = self.start();
        self.bump();
        while !self.at(Tok::Semicolon) && !self.at_eof() {
            self.bump();
        }
        self.eat(Tok::Semicolon);
        self.builder
            .alloc(Node::PragmaDirective, self.range_from(start))
    }

    fn parse_import(&mut self) -> NodeId {
        let start = self.start();
        self.bump();
        let mut path = Name::default();
        let mut symbols = Vec::new();
        if self.at(Tok::Str) {
            // import "path";
            if let Some(token) = self.bump() {
                path = strip_quotes(token.text);
            }
            if self.at(Tok::AsKw) {
                let range = self.current_range();
                self.builder
                    .error("file-level import aliases are not supported", range);
                self.bump();
                self.eat(Tok::Ident);
            }
        } else if self.eat(Tok::LBrace) {
            // import {A as B, C} from "path";
            while !self.at(Tok::RBrace) && !self.at_eof() {
                let before = self.pos;
                if let Some((name, range)) = self.expect_ident("imported symbol name") {
                    let alias = if self.eat(Tok::AsKw) {
                        self.expect_ident("import alias").map(|(alias, _)| alias)
                    } else {
                        None
                    };
                    symbols.push(ImportSymbol { name, alias, range });
                }
                if !self.eat(Tok::Comma) {
                    break;
                }
                if self.pos == before {
                    self.bump();
                }
            }
            self.expect(Tok::RBrace, "'}'");
            if self.at(Tok::Ident) && self.current_text() == "from" {
                self.bump();
            } else {
                let range = self.current_range();
                self.builder.error("expected 'from'", range);
            }
            if self.at(Tok::Str) {
                if let Some(token) = self.bump() {
                    path = strip_quotes(token.text);
                }
            } else {
                let range = self.current_range();
                self.builder.error("expected import path string", range);
            }
        } else {
            let range = self.current_range();
            self.builder
                .error("expected import path or symbol list", range);
        }
        self.expect(Tok::Semicolon, "';'");
        self.builder
            .alloc(Node::ImportDirective { path, symbols }, self.range_from(start))
    }

    // =========================================================================
    // Contracts and members
    // =========================================================================

    fn parse_contract(&mut self) -> NodeId {
        let start = self.start();
        let kind = match self.bump().map(|t| t.kind) {
            Some(Tok::LibraryKw) => ContractKind::Library,
            Some(Tok::InterfaceKw) => ContractKind::Interface,
            _ => ContractKind::Contract,
        };
        let named = self.expect_ident("contract name");
        let (name, name_range) = match named {
            Some((n, r)) => (Some(n), Some(r)),
            None => (None, None),
        };

        let mut supers = Vec::new();
        if self.eat(Tok::IsKw) {
            loop {
                supers.push(self.parse_inheritance_specifier());
                if !self.eat(Tok::Comma) {
                    break;
                }
            }
        }

        let mut members = Vec::new();
        self.expect(Tok::LBrace, "'{'");
        while !self.at(Tok::RBrace) && !self.at_eof() {
            let before = self.pos;
            match self.current().map(|t| t.kind) {
                Some(Tok::FunctionKw) => members.push(self.parse_function()),
                Some(Tok::ConstructorKw) => members.push(self.parse_constructor()),
                Some(Tok::ModifierKw) => members.push(self.parse_modifier_definition()),
                Some(Tok::StructKw) => members.push(self.parse_struct()),
                Some(Tok::EnumKw) => members.push(self.parse_enum()),
                Some(Tok::EventKw) => members.push(self.parse_event()),
                Some(Tok::Ident) => members.push(self.parse_state_variable()),
                _ => {
                    let range = self.current_range();
                    self.builder.error("unexpected token in contract body", range);
                }
            }
            if self.pos == before {
                self.bump();
            }
        }
        self.expect(Tok::RBrace, "'}'");

        self.builder.alloc(
            Node::ContractDefinition {
                kind,
                name,
                name_range,
                supers,
                members,
            },
            self.range_from(start),
        )
    }

    fn parse_inheritance_specifier(&mut self) -> NodeId {
        let start = self.start();
        match self.expect_ident("ancestor contract name") {
            Some((name, name_range)) => {
                // Base-constructor arguments are irrelevant for naming.
                self.skip_balanced_parens();
                self.builder.alloc(
                    Node::InheritanceSpecifier { name, name_range },
                    self.range_from(start),
                )
            }
            None => self.builder.alloc(Node::Error, self.range_from(start)),
        }
    }

    fn parse_state_variable(&mut self) -> NodeId {
        let start = self.start();
        let type_name = self.parse_type_name();
        while self.at(Tok::Ident) && HEADER_KEYWORDS.contains(&self.current_text()) {
            self.bump();
        }
        let Some((name, name_range)) = self.expect_ident("state variable name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let initializer = if self.eat(Tok::Eq) {
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect(Tok::Semicolon, "';'");
        self.builder.alloc(
            Node::StateVariableDeclaration {
                type_name,
                name,
                name_range,
                initializer,
            },
            self.range_from(start),
        )
    }

    fn parse_function(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `function`
        let (name, name_range) = if self.at(Tok::Ident) {
            match self.bump() {
                Some(token) => (Some(Name::from(token.text)), Some(token.range())),
                None => (None, None),
            }
        } else {
            // Legacy anonymous fallback: `function () public {}`
            (None, None)
        };
        let params = self.parse_param_list();
        let (modifiers, returns) = self.parse_function_header();
        let body = self.parse_optional_body();
        self.builder.alloc(
            Node::FunctionDefinition {
                name,
                name_range,
                params,
                returns,
                modifiers,
                body,
            },
            self.range_from(start),
        )
    }

    fn parse_constructor(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `constructor`
        let params = self.parse_param_list();
        let (modifiers, _returns) = self.parse_function_header();
        let body = self.parse_optional_body();
        self.builder.alloc(
            Node::ConstructorDefinition {
                params,
                modifiers,
                body,
            },
            self.range_from(start),
        )
    }

    /// Everything between the parameter list and the body: visibility and
    /// mutability words are skipped, `returns (...)` is collected, anything
    /// else identifier-shaped is a modifier invocation.
    fn parse_function_header(&mut self) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut modifiers = Vec::new();
        let mut returns = Vec::new();
        loop {
            if self.at(Tok::Ident) {
                if HEADER_KEYWORDS.contains(&self.current_text()) {
                    self.bump();
                    // `override(Base, Other)`
                    self.skip_balanced_parens();
                } else {
                    modifiers.push(self.parse_modifier_invocation());
                }
            } else if self.at(Tok::ReturnsKw) {
                self.bump();
                returns = self.parse_param_list();
            } else {
                break;
            }
        }
        (modifiers, returns)
    }

    fn parse_modifier_invocation(&mut self) -> NodeId {
        let start = self.start();
        let Some((name, name_range)) = self.expect_ident("modifier name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let args = if self.at(Tok::LParen) {
            self.parse_call_args()
        } else {
            Vec::new()
        };
        self.builder.alloc(
            Node::ModifierInvocation {
                name,
                name_range,
                args,
            },
            self.range_from(start),
        )
    }

    fn parse_optional_body(&mut self) -> Option<NodeId> {
        if self.at(Tok::LBrace) {
            Some(self.parse_block())
        } else {
            self.expect(Tok::Semicolon, "';' or body");
            None
        }
    }

    fn parse_modifier_definition(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `modifier`
        let Some((name, name_range)) = self.expect_ident("modifier name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let params = if self.at(Tok::LParen) {
            self.parse_param_list()
        } else {
            Vec::new()
        };
        // `virtual` is legal on bodyless modifiers.
        while self.at(Tok::Ident) && HEADER_KEYWORDS.contains(&self.current_text()) {
            self.bump();
        }
        let body = self.parse_optional_body();
        self.builder.alloc(
            Node::ModifierDefinition {
                name,
                name_range,
                params,
                body,
            },
            self.range_from(start),
        )
    }

    fn parse_struct(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `struct`
        let Some((name, name_range)) = self.expect_ident("struct name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let mut fields = Vec::new();
        self.expect(Tok::LBrace, "'{'");
        while self.at(Tok::Ident) {
            let before = self.pos;
            let field_start = self.start();
            let type_name = self.parse_type_name();
            if let Some((field_name, field_range)) = self.expect_ident("field name") {
                fields.push(self.builder.alloc(
                    Node::Parameter {
                        type_name,
                        name: Some(field_name),
                        name_range: Some(field_range),
                    },
                    self.range_from(field_start),
                ));
            }
            self.expect(Tok::Semicolon, "';'");
            if self.pos == before {
                self.bump();
            }
        }
        self.expect(Tok::RBrace, "'}'");
        self.builder.alloc(
            Node::StructDefinition {
                name,
                name_range,
                fields,
            },
            self.range_from(start),
        )
    }

    fn parse_enum(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `enum`
        let Some((name, name_range)) = self.expect_ident("enum name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let mut variants = Vec::new();
        self.expect(Tok::LBrace, "'{'");
        while self.at(Tok::Ident) {
            if let Some(token) = self.bump() {
                variants.push(self.builder.alloc(
                    Node::EnumValue {
                        name: Name::from(token.text),
                        name_range: token.range(),
                    },
                    token.range(),
                ));
            }
            if !self.eat(Tok::Comma) {
                break;
            }
        }
        self.expect(Tok::RBrace, "'}'");
        self.builder.alloc(
            Node::EnumDefinition {
                name,
                name_range,
                variants,
            },
            self.range_from(start),
        )
    }

    fn parse_event(&mut self) -> NodeId {
        let start = self.start();
        self.bump(); // `event`
        let Some((name, name_range)) = self.expect_ident("event name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let params = self.parse_param_list();
        while self.at(Tok::Ident) && HEADER_KEYWORDS.contains(&self.current_text()) {
            self.bump(); // `anonymous`
        }
        self.expect(Tok::Semicolon, "';'");
        self.builder.alloc(
            Node::EventDefinition {
                name,
                name_range,
                params,
            },
            self.range_from(start),
        )
    }

    // =========================================================================
    // Parameters and types
    // =========================================================================

    fn parse_param_list(&mut self) -> Vec<NodeId> {
        let mut params = Vec::new();
        if !self.expect(Tok::LParen, "'('") {
            return params;
        }
        while !self.at(Tok::RParen) && !self.at_eof() {
            let before = self.pos;
            if self.at(Tok::Ident) {
                params.push(self.parse_parameter());
            } else {
                let range = self.current_range();
                self.builder.error("expected parameter", range);
            }
            if !self.eat(Tok::Comma) {
                break;
            }
            if self.pos == before {
                self.bump();
            }
        }
        self.expect(Tok::RParen, "')'");
        params
    }

    fn parse_parameter(&mut self) -> NodeId {
        let start = self.start();
        let type_name = self.parse_type_name();
        while self.at(Tok::Ident) && LOCATION_KEYWORDS.contains(&self.current_text()) {
            self.bump();
        }
        let (name, name_range) = if self.at(Tok::Ident) {
            match self.bump() {
                Some(token) => (Some(Name::from(token.text)), Some(token.range())),
                None => (None, None),
            }
        } else {
            (None, None)
        };
        self.builder.alloc(
            Node::Parameter {
                type_name,
                name,
                name_range,
            },
            self.range_from(start),
        )
    }

    fn parse_type_name(&mut self) -> NodeId {
        if self.at(Tok::Ident) {
            let token = match self.bump() {
                Some(t) => t,
                None => return self.builder.alloc(Node::Error, self.current_range()),
            };
            let node = match ElementaryType::parse(token.text) {
                Some(ty) => Node::ElementaryTypeName { ty },
                None => Node::UserDefinedTypeName {
                    name: Name::from(token.text),
                    name_range: token.range(),
                },
            };
            self.builder.alloc(node, token.range())
        } else {
            let range = self.current_range();
            self.builder.error("expected type name", range);
            self.builder.alloc(Node::Error, range)
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_block(&mut self) -> NodeId {
        let start = self.start();
        self.expect(Tok::LBrace, "'{'");
        let mut statements = Vec::new();
        while !self.at(Tok::RBrace) && !self.at_eof() {
            let before = self.pos;
            statements.push(self.parse_statement());
            if self.pos == before {
                self.bump();
            }
        }
        self.expect(Tok::RBrace, "'}'");
        self.builder
            .alloc(Node::Block { statements }, self.range_from(start))
    }

    fn parse_statement(&mut self) -> NodeId {
        match self.current().map(|t| t.kind) {
            Some(Tok::LBrace) => self.parse_block(),
            Some(Tok::ReturnKw) => {
                let start = self.start();
                self.bump();
                let expr = if self.at(Tok::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr())
                };
                self.expect(Tok::Semicolon, "';'");
                self.builder
                    .alloc(Node::ReturnStatement { expr }, self.range_from(start))
            }
            Some(Tok::EmitKw) => {
                let start = self.start();
                self.bump();
                let call = self.parse_expr();
                self.expect(Tok::Semicolon, "';'");
                self.builder
                    .alloc(Node::EmitStatement { call }, self.range_from(start))
            }
            Some(Tok::IfKw) => {
                let start = self.start();
                self.bump();
                self.expect(Tok::LParen, "'('");
                let condition = self.parse_expr();
                self.expect(Tok::RParen, "')'");
                let then_branch = self.parse_statement();
                let else_branch = if self.eat(Tok::ElseKw) {
                    Some(self.parse_statement())
                } else {
                    None
                };
                self.builder.alloc(
                    Node::IfStatement {
                        condition,
                        then_branch,
                        else_branch,
                    },
                    self.range_from(start),
                )
            }
            // Two adjacent identifiers start a local variable declaration.
            Some(Tok::Ident) if self.nth_kind(1) == Some(Tok::Ident) => {
                self.parse_variable_declaration_statement()
            }
            _ => {
                let start = self.start();
                let expr = self.parse_expr();
                self.expect(Tok::Semicolon, "';'");
                self.builder
                    .alloc(Node::ExpressionStatement { expr }, self.range_from(start))
            }
        }
    }

    fn parse_variable_declaration_statement(&mut self) -> NodeId {
        let start = self.start();
        let type_name = self.parse_type_name();
        while self.at(Tok::Ident)
            && LOCATION_KEYWORDS.contains(&self.current_text())
            && self.nth_kind(1) == Some(Tok::Ident)
        {
            self.bump();
        }
        let Some((name, name_range)) = self.expect_ident("variable name") else {
            return self.builder.alloc(Node::Error, self.range_from(start));
        };
        let initializer = if self.eat(Tok::Eq) {
            Some(self.parse_expr())
        } else {
            None
        };
        self.expect(Tok::Semicolon, "';'");
        self.builder.alloc(
            Node::VariableDeclarationStatement {
                type_name,
                name,
                name_range,
                initializer,
            },
            self.range_from(start),
        )
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) -> NodeId {
        self.parse_assign()
    }

    fn parse_assign(&mut self) -> NodeId {
        let lhs = self.parse_binary(1);
        if self.eat(Tok::Eq) {
            let rhs = self.parse_assign();
            let range = TextRange::new(self.builder.range(lhs).start(), self.prev_end());
            self.builder.alloc(
                Node::BinaryExpression {
                    op: BinaryOp::Assign,
                    lhs,
                    rhs,
                },
                range,
            )
        } else {
            lhs
        }
    }

    fn binop_level(&self) -> Option<(BinaryOp, u8)> {
        let op = match self.current().map(|t| t.kind)? {
            Tok::PipePipe => (BinaryOp::Or, 1),
            Tok::AmpAmp => (BinaryOp::And, 2),
            Tok::EqEq => (BinaryOp::Eq, 3),
            Tok::BangEq => (BinaryOp::NotEq, 3),
            Tok::Lt => (BinaryOp::Lt, 4),
            Tok::Gt => (BinaryOp::Gt, 4),
            Tok::LtEq => (BinaryOp::LtEq, 4),
            Tok::GtEq => (BinaryOp::GtEq, 4),
            Tok::Plus => (BinaryOp::Add, 5),
            Tok::Minus => (BinaryOp::Sub, 5),
            Tok::Star => (BinaryOp::Mul, 6),
            Tok::Slash => (BinaryOp::Div, 6),
            Tok::Percent => (BinaryOp::Rem, 6),
            _ => return None,
        };
        Some(op)
    }

    fn parse_binary(&mut self, min_level: u8) -> NodeId {
        let mut lhs = self.parse_unary();
        while let Some((op, level)) = self.binop_level() {
            if level < min_level {
                break;
            }
            self.bump();
            let rhs = self.parse_binary(level + 1);
            let range = TextRange::new(self.builder.range(lhs).start(), self.prev_end());
            lhs = self
                .builder
                .alloc(Node::BinaryExpression { op, lhs, rhs }, range);
        }
        lhs
    }

    fn parse_unary(&mut self) -> NodeId {
        let op = match self.current().map(|t| t.kind) {
            Some(Tok::Bang) => Some(UnaryOp::Not),
            Some(Tok::Minus) => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.start();
            self.bump();
            let operand = self.parse_unary();
            self.builder.alloc(
                Node::UnaryExpression { op, operand },
                self.range_from(start),
            )
        } else {
            self.parse_postfix()
        }
    }

    fn parse_postfix(&mut self) -> NodeId {
        let mut expr = self.parse_primary();
        loop {
            if self.eat(Tok::Dot) {
                let Some((member, member_range)) = self.expect_ident("member name") else {
                    return expr;
                };
                let range = TextRange::new(self.builder.range(expr).start(), self.prev_end());
                expr = self.builder.alloc(
                    Node::MemberAccess {
                        object: expr,
                        member,
                        member_range,
                    },
                    range,
                );
            } else if self.at(Tok::LParen) {
                let args = self.parse_call_args();
                let range = TextRange::new(self.builder.range(expr).start(), self.prev_end());
                expr = self
                    .builder
                    .alloc(Node::FunctionCall { callee: expr, args }, range);
            } else {
                return expr;
            }
        }
    }

    fn parse_call_args(&mut self) -> Vec<NodeId> {
        let mut args = Vec::new();
        self.expect(Tok::LParen, "'('");
        while !self.at(Tok::RParen) && !self.at_eof() {
            let before = self.pos;
            args.push(self.parse_expr());
            if !self.eat(Tok::Comma) {
                break;
            }
            if self.pos == before {
                self.bump();
            }
        }
        self.expect(Tok::RParen, "')'");
        args
    }

    fn parse_primary(&mut self) -> NodeId {
        if let Some(token) = self.current() {
            match token.kind {
                Tok::Number => {
                    self.pos += 1;
                    return self.builder.alloc(Node::NumberLiteral, token.range());
                }
                Tok::Str => {
                    self.pos += 1;
                    return self.builder.alloc(Node::StringLiteral, token.range());
                }
                Tok::TrueKw | Tok::FalseKw => {
                    self.pos += 1;
                    return self.builder.alloc(
                        Node::BoolLiteral {
                            value: token.kind == Tok::TrueKw,
                        },
                        token.range(),
                    );
                }
                Tok::Ident => {
                    self.pos += 1;
                    return self.builder.alloc(
                        Node::Identifier {
                            name: Name::from(token.text),
                        },
                        token.range(),
                    );
                }
                _ => {}
            }
        }
        match self.current().map(|t| t.kind) {
            Some(Tok::NewKw) => {
                let start = self.start();
                self.bump();
                let type_name = self.parse_type_name();
                self.builder
                    .alloc(Node::NewExpression { type_name }, self.range_from(start))
            }
            Some(Tok::LParen) => {
                self.bump();
                let expr = self.parse_expr();
                self.expect(Tok::RParen, "')'");
                expr
            }
            _ => {
                let range = self.current_range();
                self.builder.error("expected expression", range);
                // Recovery: consume nothing at a delimiter so enclosing
                // constructs can resynchronize, otherwise skip the token.
                if !matches!(
                    self.current().map(|t| t.kind),
                    None | Some(Tok::Semicolon)
                        | Some(Tok::Comma)
                        | Some(Tok::RParen)
                        | Some(Tok::RBrace)
                        | Some(Tok::LBrace)
                ) {
                    self.bump();
                }
                self.builder.alloc(Node::Error, range)
            }
        }
    }
}

fn strip_quotes(text: &str) -> Name {
    let trimmed = text
        .strip_prefix(['"', '\''])
        .and_then(|t| t.strip_suffix(['"', '\'']))
        .unwrap_or(text);
    Name::from(trimmed)
}
