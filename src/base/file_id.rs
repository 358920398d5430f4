//! File identifiers for attributing lookups to source files.

use std::fmt;

/// A handle for a file registered in a [`FileSet`](crate::hir::FileSet).
///
/// Lookup locations and source attributions carry a `FileId` instead of a
/// path, so comparing and hashing them stays cheap.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_display() {
        assert_eq!(FileId::new(7).to_string(), "file#7");
        assert_eq!(format!("{:?}", FileId::from(3)), "FileId(3)");
    }

    #[test]
    fn test_file_id_ordering() {
        let mut ids = vec![FileId::new(2), FileId::new(0), FileId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![FileId::new(0), FileId::new(1), FileId::new(2)]);
    }
}
