//! Foundation types for the solsema toolchain.
//!
//! This module provides fundamental types used throughout the library:
//! - [`FileId`] - Interned file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Name`] - Cheap clonable identifier strings
//!
//! This module has NO dependencies on other solsema modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex};

/// An identifier string (contract name, function name, ...).
///
/// Backed by [`smol_str::SmolStr`]: clone is O(1), short names are inline.
pub type Name = smol_str::SmolStr;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
