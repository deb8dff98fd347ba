//! IDE-facing features built on the resolver.
//!
//! [`Reference`] is the uniform entry point: classify a node, then ask it to
//! resolve to declarations or enumerate completion variants.

pub mod completion;
pub mod goto;
pub mod references;

pub use completion::{CompletionItem, CompletionKind};
pub use goto::{GotoResult, GotoTarget, goto_definition};
pub use references::{Reference, reference_at_offset};
