//! Names eligible for field synthesis on binary classes.
//!
//! Binary classes list every field the compiler emitted, most of which are
//! implementation noise. Only fields whose name is already exposed as an
//! extension property of the class are synthesized. The set of such names
//! comes from an [`ExtensionPropertyNames`] implementation supplied by the
//! host; it is consulted for one class at a time, never for a hierarchy.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::Name;

use super::graph::{ClassGraph, RawMethod};
use super::ids::ClassId;
use super::types::{PrimitiveTy, RawType};

/// A set of interned property names.
pub type NameSet = FxHashSet<Name>;

/// Resolves the extension property names exposed on a single class.
pub trait ExtensionPropertyNames {
    /// Names exposed on `class`'s own type. Must not include names that
    /// only come from superclasses.
    fn names_for(&self, graph: &ClassGraph, class: ClassId) -> NameSet;
}

/// Derives property names from a binary class's accessor methods.
///
/// An instance method `getFoo()` with no parameters and a non-void return
/// type exposes `foo`; `isFoo()` returning `boolean` exposes `isFoo`.
/// Source classes expose no names this way.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessorPropertyNames;

impl AccessorPropertyNames {
    /// The property name a getter exposes, if `method` is one.
    pub fn property_name(method: &RawMethod) -> Option<String> {
        if method.is_static || method.param_count != 0 {
            return None;
        }

        if let Some(rest) = method.name.strip_prefix("is")
            && starts_upper(rest)
            && method.returns == RawType::Primitive(PrimitiveTy::Boolean)
        {
            return Some(method.name.to_string());
        }

        let rest = method.name.strip_prefix("get")?;
        if !starts_upper(rest) || method.returns == RawType::Primitive(PrimitiveTy::Void) {
            return None;
        }
        Some(decapitalize(rest))
    }
}

impl ExtensionPropertyNames for AccessorPropertyNames {
    fn names_for(&self, graph: &ClassGraph, class: ClassId) -> NameSet {
        let Some(node) = graph.get(class) else {
            return NameSet::default();
        };

        node.methods()
            .iter()
            .filter_map(Self::property_name)
            .map(|name| graph.intern(&name))
            .collect()
    }
}

/// Host-populated names, keyed by class.
#[derive(Clone, Debug, Default)]
pub struct FixedPropertyNames {
    names: FxHashMap<ClassId, NameSet>,
}

impl FixedPropertyNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add names for a class, interning them in `graph`.
    pub fn insert<'a>(
        &mut self,
        graph: &ClassGraph,
        class: ClassId,
        names: impl IntoIterator<Item = &'a str>,
    ) {
        self.names
            .entry(class)
            .or_default()
            .extend(names.into_iter().map(|name| graph.intern(name)));
    }

    pub fn with(
        mut self,
        graph: &ClassGraph,
        class: ClassId,
        names: &[&str],
    ) -> Self {
        self.insert(graph, class, names.iter().copied());
        self
    }
}

impl ExtensionPropertyNames for FixedPropertyNames {
    fn names_for(&self, _graph: &ClassGraph, class: ClassId) -> NameSet {
        self.names.get(&class).cloned().unwrap_or_default()
    }
}

/// Accessor prefixes must be followed by something other than an ASCII
/// lowercase letter, so `getter` and `issue` are not accessors.
fn starts_upper(s: &str) -> bool {
    s.chars().next().is_some_and(|c| !c.is_ascii_lowercase())
}

/// `Foo` → `foo`, `URL` → `url`, `URLConnection` → `urlConnection`.
///
/// Only ASCII capitals are lowered; `État` stays `État`.
fn decapitalize(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let upper_run = chars.iter().take_while(|c| c.is_ascii_uppercase()).count();

    // Keep the last capital of a run when it starts the next word
    let lower_until = if upper_run > 1 && upper_run < chars.len() {
        upper_run - 1
    } else {
        upper_run
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < lower_until { c.to_ascii_lowercase() } else { *c })
        .collect()
}
