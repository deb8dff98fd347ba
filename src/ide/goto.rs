//! Go-to-definition implementation.

use crate::base::{FileId, Name, TextRange, TextSize};
use crate::project::Project;
use crate::syntax::{DeclKind, NodeRef};

use super::references::reference_at_offset;

/// Result of a go-to-definition request.
#[derive(Clone, Debug)]
pub struct GotoResult {
    /// The targets to jump to.
    pub targets: Vec<GotoTarget>,
}

impl GotoResult {
    /// Create an empty result (no targets found).
    pub fn empty() -> Self {
        GotoResult {
            targets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A target location for go-to-definition.
#[derive(Clone, Debug)]
pub struct GotoTarget {
    /// The file containing the declaration.
    pub file: FileId,
    /// Range of the declaration's name token (the whole declaration for
    /// unnamed ones, like constructors).
    pub range: TextRange,
    /// The declaration's name, if it has one.
    pub name: Option<Name>,
    pub kind: Option<DeclKind>,
}

impl GotoTarget {
    pub fn from_decl(project: &Project, decl: NodeRef) -> Self {
        GotoTarget {
            file: decl.file,
            range: project.name_range_of(decl),
            name: project.name_of(decl).cloned(),
            kind: project.decl_kind(decl),
        }
    }
}

/// Resolve the reference under the cursor to its declaration sites.
///
/// An empty result is the normal outcome for an unresolved name; multiple
/// targets mean the reference is ambiguous and all candidates are offered.
pub fn goto_definition(project: &Project, file: FileId, offset: TextSize) -> GotoResult {
    let Some(reference) = reference_at_offset(project, file, offset) else {
        return GotoResult::empty();
    };
    let targets = reference
        .resolve(project)
        .into_iter()
        .map(|decl| GotoTarget::from_decl(project, decl))
        .collect();
    GotoResult { targets }
}
