//! Files known to the evaluator, lookup locations, and source attribution.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::{FileId, Name, TextRange};

use super::graph::{ClassNode, RawField};
use super::ids::ClassId;

/// Compilation target of a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    #[default]
    Jvm,
    Js,
    Native,
    Wasm,
    /// Platform-agnostic code shared by several targets.
    Common,
}

impl TargetPlatform {
    /// Platforms whose classes expose raw backing fields to the debugger.
    pub fn supports_field_access(self) -> bool {
        matches!(self, TargetPlatform::Jvm | TargetPlatform::Common)
    }
}

/// What kind of file a [`FileId`] refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileKind {
    #[default]
    Regular,
    /// A snippet compiled on the fly by the debugger.
    CodeFragment {
        /// Set by the evaluator when the fragment is evaluated against the
        /// runtime type of the receiver.
        runtime_type_evaluator: bool,
    },
}

impl FileKind {
    pub fn is_runtime_evaluated_fragment(self) -> bool {
        matches!(self, FileKind::CodeFragment { runtime_type_evaluator: true })
    }
}

/// Per-file facts the applicability gate reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub platform: TargetPlatform,
    pub kind: FileKind,
    /// Cleared once the file is deleted or replaced.
    pub valid: bool,
}

/// Registry mapping paths to [`FileId`]s.
///
/// Assigns stable ids to paths and tracks what the evaluator knows about
/// each file.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    path_to_id: IndexMap<PathBuf, FileId>,
    files: IndexMap<FileId, FileInfo>,
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a FileId for a path.
    ///
    /// New files start out as valid regular JVM files.
    pub fn file_id(&self, path: &Path) -> FileId {
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();

        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.files.insert(
            id,
            FileInfo {
                path: path.to_owned(),
                platform: TargetPlatform::default(),
                kind: FileKind::default(),
                valid: true,
            },
        );
        id
    }

    /// Register a debugger code fragment.
    pub fn code_fragment(
        &self,
        path: &Path,
        platform: TargetPlatform,
        runtime_type_evaluator: bool,
    ) -> FileId {
        let id = self.file_id(path);
        self.update(id, |info| {
            info.platform = platform;
            info.kind = FileKind::CodeFragment { runtime_type_evaluator };
        });
        id
    }

    pub fn set_platform(&self, file: FileId, platform: TargetPlatform) {
        self.update(file, |info| info.platform = platform);
    }

    pub fn set_kind(&self, file: FileId, kind: FileKind) {
        self.update(file, |info| info.kind = kind);
    }

    /// Mark a file as no longer valid. Its id stays reserved.
    pub fn invalidate(&self, file: FileId) {
        self.update(file, |info| info.valid = false);
    }

    pub fn info(&self, file: FileId) -> Option<FileInfo> {
        self.inner.read().files.get(&file).cloned()
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().files.get(&file).map(|info| info.path.clone())
    }

    /// Remove a file from the set.
    pub fn remove(&self, file: FileId) {
        let mut inner = self.inner.write();
        if let Some(info) = inner.files.swap_remove(&file) {
            inner.path_to_id.swap_remove(&info.path);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(&self, file: FileId, f: impl FnOnce(&mut FileInfo)) {
        if let Some(info) = self.inner.write().files.get_mut(&file) {
            f(info);
        }
    }
}

/// Where and why a lookup happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupLocation {
    /// The lookup is not tied to any source element.
    NoLocation,
    /// A lookup issued by a synthetic scope on its own behalf.
    FromSyntheticScope,
    /// A lookup for an element in evaluated or edited code.
    Element {
        /// `None` when the element has been detached from its file.
        file: Option<FileId>,
        range: TextRange,
    },
}

impl LookupLocation {
    pub fn element(file: FileId, range: TextRange) -> Self {
        LookupLocation::Element { file: Some(file), range }
    }

    /// The file this lookup is attributed to, if any.
    pub fn file(&self) -> Option<FileId> {
        match self {
            LookupLocation::Element { file, .. } => *file,
            _ => None,
        }
    }
}

/// Opaque token attributing a symbol to where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceElement {
    NoSource,
    /// A declaration in a source file.
    Declared { file: FileId, range: TextRange },
    /// A field read from binary metadata.
    External { class: ClassId, field: Name },
}

/// Produces attribution tokens for raw binary fields.
pub trait SourceElementFactory {
    fn source(&self, class: &ClassNode, field: &RawField) -> SourceElement;
}

/// Attributes every binary field to its owning class and name.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExternalSourceFactory;

impl SourceElementFactory for ExternalSourceFactory {
    fn source(&self, class: &ClassNode, field: &RawField) -> SourceElement {
        SourceElement::External { class: class.id(), field: field.name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_set_id_assignment() {
        let files = FileSet::new();

        let id1 = files.file_id(Path::new("/Main.kt"));
        let id2 = files.file_id(Path::new("/Other.kt"));
        let id3 = files.file_id(Path::new("/Main.kt"));

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_code_fragment_registration() {
        let files = FileSet::new();
        let id = files.code_fragment(Path::new("/fragment.kt"), TargetPlatform::Common, true);

        let info = files.info(id).unwrap();
        assert_eq!(info.platform, TargetPlatform::Common);
        assert!(info.kind.is_runtime_evaluated_fragment());
        assert!(info.valid);
    }

    #[test]
    fn test_invalidate_and_remove() {
        let files = FileSet::new();
        let path = Path::new("/Main.kt");
        let id = files.file_id(path);

        files.invalidate(id);
        assert!(!files.info(id).unwrap().valid);

        files.remove(id);
        assert!(files.info(id).is_none());
        assert!(files.is_empty());
        assert_ne!(files.file_id(path), id);
    }

    #[test]
    fn test_set_platform_and_path() {
        let files = FileSet::new();
        let path = Path::new("/shared/Common.kt");
        let id = files.file_id(path);

        files.set_platform(id, TargetPlatform::Native);
        let info = files.info(id).unwrap();
        assert_eq!(info.platform, TargetPlatform::Native);
        assert_eq!(info.kind, FileKind::Regular);
        assert_eq!(files.path(id).as_deref(), Some(path));
    }

    #[test]
    fn test_platform_support() {
        assert!(TargetPlatform::Jvm.supports_field_access());
        assert!(TargetPlatform::Common.supports_field_access());
        assert!(!TargetPlatform::Js.supports_field_access());
        assert!(!TargetPlatform::Native.supports_field_access());
    }
}
