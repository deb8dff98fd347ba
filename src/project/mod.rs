//! The multi-file model.
//!
//! A [`Project`] is an immutable-once-built set of parsed [`SourceFile`]s,
//! keyed by the path string they were added under. Import directives are
//! resolved against these path strings. All resolution operates on a
//! `&Project` snapshot: replacing a file produces a new tree for it, and any
//! outstanding [`NodeRef`]s from the old tree are stale.

mod builtins;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::base::{FileId, Name, TextRange};
use crate::parser;
use crate::syntax::{DeclKind, Node, NodeRef, SourceFile};

pub use builtins::BUILTINS_PATH;
pub(crate) use builtins::{ADDRESS_CONTRACT, BYTES_CONTRACT, GLOBALS_CONTRACT};

/// Error raised while loading sources from disk.
///
/// Resolution itself never fails; only the outer loading surface does.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An ordered collection of parsed source files.
#[derive(Debug)]
pub struct Project {
    /// Path → parsed file. `FileId`s are slot indices, so insertion order is
    /// resolution order and must stay stable.
    files: IndexMap<Name, SourceFile>,
}

impl Project {
    /// Create a project containing only the builtin declarations
    /// (`msg`, `block`, `tx`, and friends).
    pub fn new() -> Project {
        let mut project = Project {
            files: IndexMap::new(),
        };
        project.add_source(BUILTINS_PATH, builtins::BUILTINS_SOURCE);
        project
    }

    /// Parse `text` and store it under `path`, replacing any previous
    /// version of that file.
    pub fn add_source(&mut self, path: &str, text: &str) -> FileId {
        let path = Name::from(path);
        let file = match self.files.get_index_of(&path) {
            Some(index) => FileId::new(index as u32),
            None => FileId::new(self.files.len() as u32),
        };
        let parsed = parser::parse(file, text);
        debug!(%file, path = %path, errors = parsed.errors().len(), "parsed source");
        self.files.insert(path, parsed);
        file
    }

    /// Read a file from disk and add it under its path string.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, ProjectError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.add_source(&path.to_string_lossy(), &text))
    }

    /// The file holding builtin declarations. Always present.
    pub fn builtins_file(&self) -> FileId {
        FileId::new(0)
    }

    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files
            .get_index_of(path)
            .map(|index| FileId::new(index as u32))
    }

    pub fn path(&self, file: FileId) -> Option<&Name> {
        self.files.get_index(file.index()).map(|(path, _)| path)
    }

    pub fn source(&self, file: FileId) -> &SourceFile {
        &self.files[file.index()]
    }

    /// All files in insertion order, builtins first.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files
            .values()
            .enumerate()
            .map(|(index, source)| (FileId::new(index as u32), source))
    }

    /// Resolve an import path string relative to the importing file.
    ///
    /// `./` and `../` specs are normalized against the importing file's
    /// directory; anything else must match a stored path exactly.
    pub fn resolve_import(&self, from: FileId, spec: &str) -> Option<FileId> {
        if spec.starts_with("./") || spec.starts_with("../") {
            let base = self.path(from)?;
            let dir = match base.rfind('/') {
                Some(slash) => &base[..slash],
                None => "",
            };
            let normalized = normalize_path(dir, spec);
            if let Some(file) = self.file_id(&normalized) {
                return Some(file);
            }
        }
        self.file_id(spec)
    }

    // =========================================================================
    // Node accessors
    // =========================================================================

    pub fn node(&self, node: NodeRef) -> &Node {
        self.source(node.file).node(node.node)
    }

    pub fn range_of(&self, node: NodeRef) -> TextRange {
        self.source(node.file).range(node.node)
    }

    /// The name a declaration introduces, `None` for unnamed/malformed ones.
    pub fn name_of(&self, node: NodeRef) -> Option<&Name> {
        self.source(node.file).decl_name(node.node)
    }

    pub fn name_range_of(&self, node: NodeRef) -> TextRange {
        self.source(node.file).decl_name_range(node.node)
    }

    pub fn decl_kind(&self, node: NodeRef) -> Option<DeclKind> {
        self.source(node.file).decl_kind(node.node)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new()
    }
}

/// Join `dir` and a `./`/`../` spec, collapsing the dot segments.
fn normalize_path(dir: &str, spec: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in spec.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
