//! String interning for class and field names.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;

/// An interned identifier.
///
/// Field names are compared on every step of a hierarchy walk, so they are
/// interned once when the class graph is built and handled as a `u32`
/// afterwards. The text lives in the [`Interner`] that created the name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub(crate) const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Returns true if `s` is a single identifier (`count`, `_x`, `größe`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
        }
        _ => false,
    }
}

/// Returns true if `s` is a legal unqualified member name in compiled JVM
/// metadata (`$VALUES`, `$assertionsDisabled`, `my field`).
///
/// Class files only forbid `.`, `;`, `[`, `/`, `<` and `>` in field and
/// method names.
pub fn is_jvm_member_name(s: &str) -> bool {
    !s.is_empty() && !s.contains(['.', ';', '[', '/', '<', '>'])
}

/// Returns true if `s` is a dot-separated path of identifiers
/// (`java.util.ArrayList`, `Outer$Inner`).
pub fn is_qualified_identifier(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// String interner shared by a class graph and everything resolved over it.
///
/// Thread-safe via internal locking, so a graph snapshot can be read from
/// several evaluator threads while descriptors intern their suffixed names.
#[derive(Default)]
pub struct Interner {
    inner: RwLock<InternerInner>,
}

#[derive(Default)]
struct InternerInner {
    map: FxHashMap<SmolStr, u32>,
    strings: Vec<SmolStr>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the existing `Name` if it was seen before.
    pub fn intern(&self, s: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&index) = inner.map.get(s) {
                return Name::from_raw(index);
            }
        }

        let mut inner = self.inner.write();

        // Another writer may have won the race
        if let Some(&index) = inner.map.get(s) {
            return Name::from_raw(index);
        }

        let smol = SmolStr::new(s);
        let index = inner.strings.len() as u32;
        inner.strings.push(smol.clone());
        inner.map.insert(smol, index);

        Name::from_raw(index)
    }

    /// Find the `Name` for `s` without interning it.
    pub fn find(&self, s: &str) -> Option<Name> {
        self.inner.read().map.get(s).copied().map(Name::from_raw)
    }

    /// Look up the string for a `Name`.
    ///
    /// Returns `None` if the `Name` was created by a different interner.
    pub fn lookup(&self, name: Name) -> Option<SmolStr> {
        self.inner.read().strings.get(name.0 as usize).cloned()
    }

    /// Text of `name` for messages and logs; foreign names render as `<?>`.
    pub fn display(&self, name: Name) -> SmolStr {
        self.lookup(name)
            .unwrap_or_else(|| SmolStr::new_static("<?>"))
    }

    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Interner")
            .field("count", &inner.strings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string() {
        let interner = Interner::new();

        let a = interner.intern("count");
        let b = interner.intern("count");

        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_find_does_not_intern() {
        let interner = Interner::new();
        assert_eq!(interner.find("count"), None);
        assert!(interner.is_empty());

        let name = interner.intern("count");
        assert_eq!(interner.find("count"), Some(name));
    }

    #[test]
    fn test_display_foreign_name() {
        let interner = Interner::new();
        let other = Interner::new();
        other.intern("a");
        let foreign = other.intern("b");

        assert_eq!(interner.display(foreign).as_str(), "<?>");
        assert_eq!(other.display(foreign).as_str(), "b");
    }

    #[test]
    fn test_jvm_member_names() {
        assert!(is_jvm_member_name("$VALUES"));
        assert!(is_jvm_member_name("$assertionsDisabled"));
        assert!(is_jvm_member_name("my field"));
        assert!(is_jvm_member_name("count"));
        assert!(!is_jvm_member_name(""));
        assert!(!is_jvm_member_name("a.b"));
        assert!(!is_jvm_member_name("<init>"));
        assert!(!is_jvm_member_name("[I"));
        assert!(!is_jvm_member_name("java/lang"));
        assert!(!is_jvm_member_name("x;"));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("count"));
        assert!(is_identifier("_hidden"));
        assert!(is_identifier("this$0"));
        assert!(is_identifier("größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("a.b"));

        assert!(is_qualified_identifier("java.util.ArrayList"));
        assert!(!is_identifier("$VALUES"));
        assert!(!is_qualified_identifier("java..util"));
        assert!(!is_qualified_identifier(""));
    }

    #[test]
    fn test_name_size() {
        assert_eq!(std::mem::size_of::<Name>(), 4);
    }
}
