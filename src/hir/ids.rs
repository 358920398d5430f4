//! Identifiers for class graph vertices.

use std::fmt;

/// Identifies a class within one [`ClassGraph`](super::ClassGraph).
///
/// Ids are assigned sequentially as classes are declared. The universal
/// root class is always `ClassId(0)`. An id is only meaningful for the
/// graph that issued it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ClassId(pub u32);

impl ClassId {
    /// The universal root class every graph starts with.
    pub const ROOT: ClassId = ClassId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == Self::ROOT.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl From<u32> for ClassId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_id_root() {
        assert!(ClassId::ROOT.is_root());
        assert!(!ClassId::new(1).is_root());
        assert_eq!(ClassId::from(0), ClassId::ROOT);
    }

    #[test]
    fn test_class_id_size() {
        assert_eq!(std::mem::size_of::<ClassId>(), 4);
    }
}
