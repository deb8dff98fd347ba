//! Logos-based lexer for Solidity.

use crate::base::{TextRange, TextSize};
use logos::Logos;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: Tok,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Tok>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Tok::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);
        let kind = result.unwrap_or(Tok::Error);
        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string, dropping trivia.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).filter(|t| !t.kind.is_trivia()).collect()
}

/// Token kinds.
///
/// Visibility and mutability words (`public`, `view`, ...) are soft keywords:
/// they lex as [`Tok::Ident`] and the parser inspects the text, matching how
/// Solidity itself treats context-dependent words like `from`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F]+|[0-9]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("pragma")]
    PragmaKw,
    #[token("import")]
    ImportKw,
    #[token("as")]
    AsKw,
    #[token("contract")]
    ContractKw,
    #[token("library")]
    LibraryKw,
    #[token("interface")]
    InterfaceKw,
    #[token("is")]
    IsKw,
    #[token("function")]
    FunctionKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("modifier")]
    ModifierKw,
    #[token("struct")]
    StructKw,
    #[token("enum")]
    EnumKw,
    #[token("event")]
    EventKw,
    #[token("emit")]
    EmitKw,
    #[token("return")]
    ReturnKw,
    #[token("returns")]
    ReturnsKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("new")]
    NewKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    /// Anything the lexer could not recognize.
    #[regex(r".", priority = 0)]
    Error,
}

impl Tok {
    pub fn is_trivia(self) -> bool {
        matches!(self, Tok::Whitespace | Tok::LineComment | Tok::BlockComment)
    }
}
