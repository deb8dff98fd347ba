//! # solsema-base
//!
//! Core library for Solidity parsing, AST, and name resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (references, completion, goto-def)
//!   ↓
//! sema      → Scopes, contract hierarchy, types, the resolver
//!   ↓
//! project   → Multi-file model, import path resolution
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! syntax    → Arena syntax tree, typed node payloads
//!   ↓
//! base      → Primitives (FileId, Name, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → project → sema → ide)
// ============================================================================

/// Foundation types: FileId, Name, TextRange, line/column conversion
pub mod base;

/// Syntax: arena syntax tree with typed payloads and navigation
pub mod syntax;

/// Parser: Logos lexer, recursive-descent parser
pub mod parser;

/// Project: multi-file model, import path resolution, source loading
pub mod project;

/// Semantics: scope & import index, contract hierarchy, types, resolver
pub mod sema;

/// IDE features: reference wrappers, completion, goto-definition
pub mod ide;

// Re-export foundation types
pub use base::{FileId, LineCol, LineIndex, Name, TextRange, TextSize};
pub use project::Project;
pub use syntax::NodeRef;
