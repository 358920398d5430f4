//! The class hierarchy graph the engine resolves over.
//!
//! A [`ClassGraph`] is an arena of [`ClassNode`]s. Every graph starts with
//! the universal root class; every other class has exactly one superclass,
//! which must already be declared, so superclass chains always end at the
//! root.
//!
//! Classes come in two representations:
//!
//! - **Source-defined** classes carry [`SourceField`]s with resolved types
//!   and a flag telling whether the property has a backing field.
//! - **Binary-defined** classes carry [`RawField`]s and [`RawMethod`]s as
//!   read from compiled metadata, with unresolved [`RawType`]s.
//!
//! A third case, [`ClassRepr::OpaqueBinary`], marks binary classes whose
//! raw member lists were never loaded. They can be part of a hierarchy but
//! asking for their fields is a contract violation.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Interner, Name, is_identifier, is_jvm_member_name, is_qualified_identifier};

use super::error::{GraphError, ResolveError, ResolveResult};
use super::ids::ClassId;
use super::source::SourceElement;
use super::types::{RawType, Ty, TypeArg};

/// Name of the root class in graphs built with [`ClassGraph::new`].
pub const DEFAULT_ROOT_NAME: &str = "Any";

// ============================================================================
// FIELDS & METHODS
// ============================================================================

/// A property declared in a source-defined class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceField {
    pub name: Name,
    pub ty: Ty,
    pub is_var: bool,
    /// False for computed properties that have no storage slot.
    pub has_backing_field: bool,
    pub source: SourceElement,
}

/// A field as listed in binary class metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawField {
    pub name: Name,
    pub ty: RawType,
    pub is_final: bool,
    pub is_static: bool,
    pub is_enum_entry: bool,
}

/// A method as listed in binary class metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMethod {
    pub name: SmolStr,
    pub param_count: usize,
    pub returns: RawType,
    pub is_static: bool,
}

/// Declaration of a [`SourceField`].
#[derive(Clone, Debug)]
pub struct SourceFieldDecl {
    name: SmolStr,
    ty: Ty,
    is_var: bool,
    has_backing_field: bool,
    source: SourceElement,
}

impl SourceFieldDecl {
    /// A read-only property with a backing field.
    pub fn val(name: impl Into<SmolStr>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            is_var: false,
            has_backing_field: true,
            source: SourceElement::NoSource,
        }
    }

    /// A mutable property with a backing field.
    pub fn var(name: impl Into<SmolStr>, ty: Ty) -> Self {
        Self { is_var: true, ..Self::val(name, ty) }
    }

    /// Mark the property as computed (no storage slot).
    pub fn without_backing_field(mut self) -> Self {
        self.has_backing_field = false;
        self
    }

    pub fn with_source(mut self, source: SourceElement) -> Self {
        self.source = source;
        self
    }
}

/// Declaration of a [`RawField`]. Fields start out as mutable instance fields.
#[derive(Clone, Debug)]
pub struct RawFieldDecl {
    name: SmolStr,
    ty: RawType,
    is_final: bool,
    is_static: bool,
    is_enum_entry: bool,
}

impl RawFieldDecl {
    pub fn new(name: impl Into<SmolStr>, ty: RawType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_final: false,
            is_static: false,
            is_enum_entry: false,
        }
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Enum constants are always static and final as well.
    pub fn with_enum_entry(mut self) -> Self {
        self.is_enum_entry = true;
        self.is_static = true;
        self.is_final = true;
        self
    }
}

/// Declaration of a [`RawMethod`]. Methods start out as instance methods
/// without parameters.
#[derive(Clone, Debug)]
pub struct RawMethodDecl {
    name: SmolStr,
    param_count: usize,
    returns: RawType,
    is_static: bool,
}

impl RawMethodDecl {
    pub fn new(name: impl Into<SmolStr>, returns: RawType) -> Self {
        Self {
            name: name.into(),
            param_count: 0,
            returns,
            is_static: false,
        }
    }

    pub fn with_params(mut self, count: usize) -> Self {
        self.param_count = count;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

// ============================================================================
// CLASSES
// ============================================================================

/// How a class's members are represented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassRepr {
    Source {
        fields: Vec<SourceField>,
    },
    Binary {
        fields: Vec<RawField>,
        methods: Vec<RawMethod>,
    },
    /// Binary class without a raw member list.
    OpaqueBinary,
}

/// The discriminant of a [`ClassRepr`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    SourceDefined,
    BinaryDefined,
    OpaqueBinary,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::SourceDefined => "source class",
            ClassKind::BinaryDefined => "binary class",
            ClassKind::OpaqueBinary => "opaque binary class",
        }
    }
}

/// The declared fields of a class, in the shape its representation uses.
#[derive(Clone, Copy, Debug)]
pub enum DeclaredFields<'a> {
    Source(&'a [SourceField]),
    Binary(&'a [RawField]),
}

/// A vertex of the class graph.
#[derive(Clone, Debug)]
pub struct ClassNode {
    id: ClassId,
    name: Name,
    qualified_name: SmolStr,
    type_params: Vec<SmolStr>,
    /// `None` only for the root class.
    superclass: Option<ClassId>,
    repr: ClassRepr,
}

impl ClassNode {
    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn type_params(&self) -> &[SmolStr] {
        &self.type_params
    }

    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    pub fn repr(&self) -> &ClassRepr {
        &self.repr
    }

    pub fn kind(&self) -> ClassKind {
        match self.repr {
            ClassRepr::Source { .. } => ClassKind::SourceDefined,
            ClassRepr::Binary { .. } => ClassKind::BinaryDefined,
            ClassRepr::OpaqueBinary => ClassKind::OpaqueBinary,
        }
    }

    /// The class type with each type parameter as its own argument
    /// (`Box<T>` for `class Box<T>`).
    pub fn default_type(&self) -> Ty {
        Ty::class(
            self.id,
            self.type_params
                .iter()
                .map(|param| TypeArg::Type(Ty::Param(param.clone())))
                .collect(),
        )
    }

    /// Binary methods, empty for other representations.
    pub fn methods(&self) -> &[RawMethod] {
        match &self.repr {
            ClassRepr::Binary { methods, .. } => methods,
            _ => &[],
        }
    }
}

enum DeclRepr {
    Source(Vec<SourceFieldDecl>),
    Binary(Vec<RawFieldDecl>, Vec<RawMethodDecl>),
    OpaqueBinary,
}

/// Builder for a class to be added with [`ClassGraph::declare`].
pub struct ClassDecl {
    name: SmolStr,
    type_params: Vec<SmolStr>,
    superclass: Option<ClassId>,
    repr: DeclRepr,
}

impl ClassDecl {
    fn new(name: impl Into<SmolStr>, repr: DeclRepr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            superclass: None,
            repr,
        }
    }

    pub fn source(name: impl Into<SmolStr>, fields: Vec<SourceFieldDecl>) -> Self {
        Self::new(name, DeclRepr::Source(fields))
    }

    pub fn binary(name: impl Into<SmolStr>, fields: Vec<RawFieldDecl>) -> Self {
        Self::new(name, DeclRepr::Binary(fields, Vec::new()))
    }

    pub fn binary_with_methods(
        name: impl Into<SmolStr>,
        fields: Vec<RawFieldDecl>,
        methods: Vec<RawMethodDecl>,
    ) -> Self {
        Self::new(name, DeclRepr::Binary(fields, methods))
    }

    pub fn opaque_binary(name: impl Into<SmolStr>) -> Self {
        Self::new(name, DeclRepr::OpaqueBinary)
    }

    /// Set the superclass. Classes without one extend the root.
    pub fn extends(mut self, superclass: ClassId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn with_type_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.type_params = params.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// Arena of classes plus the interner their names live in.
#[derive(Debug)]
pub struct ClassGraph {
    interner: Interner,
    classes: Vec<ClassNode>,
    by_name: FxHashMap<SmolStr, ClassId>,
}

impl Default for ClassGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassGraph {
    /// Create a graph containing only the root class [`DEFAULT_ROOT_NAME`].
    pub fn new() -> Self {
        Self::with_root_name(DEFAULT_ROOT_NAME)
    }

    /// Create a graph whose root class has the given name
    /// (e.g. `java.lang.Object`). The root has no fields.
    pub fn with_root_name(root: &str) -> Self {
        let interner = Interner::new();
        let qualified_name = SmolStr::new(root);
        let root = ClassNode {
            id: ClassId::ROOT,
            name: interner.intern(root),
            qualified_name: qualified_name.clone(),
            type_params: Vec::new(),
            superclass: None,
            repr: ClassRepr::Source { fields: Vec::new() },
        };

        let mut by_name = FxHashMap::default();
        by_name.insert(qualified_name, ClassId::ROOT);

        Self {
            interner,
            classes: vec![root],
            by_name,
        }
    }

    /// Add a class to the graph.
    ///
    /// Source members must be plain identifiers. Binary members follow the
    /// class-file rules, so synthetic names like `$VALUES` are accepted.
    /// Ids are `u32`, and declaring past that many classes fails with
    /// [`GraphError::TooManyClasses`].
    pub fn declare(&mut self, decl: ClassDecl) -> Result<ClassId, GraphError> {
        let ClassDecl { name, type_params, superclass, repr } = decl;

        if !is_qualified_identifier(&name) {
            return Err(GraphError::InvalidClassName(name));
        }
        if let Some(param) = type_params.iter().find(|p| !is_identifier(p)) {
            return Err(GraphError::InvalidTypeParam {
                class: name,
                param: param.clone(),
            });
        }
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateClass(name));
        }

        let superclass = superclass.unwrap_or(ClassId::ROOT);
        if self.get(superclass).is_none() {
            return Err(GraphError::UnknownSuperclass { class: name, superclass });
        }

        let id = u32::try_from(self.classes.len())
            .map(ClassId::new)
            .map_err(|_| GraphError::TooManyClasses(name.clone()))?;
        let repr = match repr {
            DeclRepr::Source(decls) => {
                let mut fields = Vec::with_capacity(decls.len());
                for decl in decls {
                    let field = self.field_name(&name, &decl.name, is_identifier, |n| {
                        fields.iter().any(|f: &SourceField| f.name == n)
                    })?;
                    fields.push(SourceField {
                        name: field,
                        ty: decl.ty,
                        is_var: decl.is_var,
                        has_backing_field: decl.has_backing_field,
                        source: decl.source,
                    });
                }
                ClassRepr::Source { fields }
            }
            DeclRepr::Binary(field_decls, method_decls) => {
                let mut fields = Vec::with_capacity(field_decls.len());
                for decl in field_decls {
                    // Compiled classes carry synthetic members such as `$VALUES`
                    let field = self.field_name(&name, &decl.name, is_jvm_member_name, |n| {
                        fields.iter().any(|f: &RawField| f.name == n)
                    })?;
                    fields.push(RawField {
                        name: field,
                        ty: decl.ty,
                        is_final: decl.is_final,
                        is_static: decl.is_static,
                        is_enum_entry: decl.is_enum_entry,
                    });
                }
                // Overloads are allowed, so methods are only checked for shape
                let mut methods = Vec::with_capacity(method_decls.len());
                for decl in method_decls {
                    if !is_jvm_member_name(&decl.name) {
                        return Err(GraphError::InvalidMethodName {
                            class: name,
                            method: decl.name,
                        });
                    }
                    methods.push(RawMethod {
                        name: decl.name,
                        param_count: decl.param_count,
                        returns: decl.returns,
                        is_static: decl.is_static,
                    });
                }
                ClassRepr::Binary { fields, methods }
            }
            DeclRepr::OpaqueBinary => ClassRepr::OpaqueBinary,
        };

        tracing::trace!(
            class = %name,
            id = id.index(),
            superclass = superclass.index(),
            "declared class"
        );

        self.classes.push(ClassNode {
            id,
            name: self.interner.intern(&name),
            qualified_name: name.clone(),
            type_params,
            superclass: Some(superclass),
            repr,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    fn field_name(
        &self,
        class: &SmolStr,
        field: &SmolStr,
        is_valid: fn(&str) -> bool,
        already_declared: impl Fn(Name) -> bool,
    ) -> Result<Name, GraphError> {
        if !is_valid(field) {
            return Err(GraphError::InvalidFieldName {
                class: class.clone(),
                field: field.clone(),
            });
        }
        let name = self.interner.intern(field);
        if already_declared(name) {
            return Err(GraphError::DuplicateField {
                class: class.clone(),
                field: field.clone(),
            });
        }
        Ok(name)
    }

    pub fn root(&self) -> ClassId {
        ClassId::ROOT
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassNode> {
        self.classes.get(id.index() as usize)
    }

    /// Look up a class by qualified name.
    pub fn class_named(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Text of an interned name.
    pub fn name_str(&self, name: Name) -> SmolStr {
        self.interner.display(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.iter()
    }

    /// Number of classes, including the root.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    // ========================================================================
    // ACCESSOR
    // ========================================================================

    /// The nearest superclass of `id` that is not the root.
    pub fn superclass_not_root(&self, id: ClassId) -> Option<ClassId> {
        self.get(id)?.superclass.filter(|superclass| !superclass.is_root())
    }

    pub fn kind(&self, id: ClassId) -> Option<ClassKind> {
        self.get(id).map(ClassNode::kind)
    }

    /// The fields declared directly in `id`.
    ///
    /// Fails for ids from another graph and for opaque binary classes.
    pub fn declared_fields(&self, id: ClassId) -> ResolveResult<DeclaredFields<'_>> {
        let node = self.get(id).ok_or(ResolveError::UnknownClass(id))?;
        match &node.repr {
            ClassRepr::Source { fields } => Ok(DeclaredFields::Source(fields)),
            ClassRepr::Binary { fields, .. } => Ok(DeclaredFields::Binary(fields)),
            ClassRepr::OpaqueBinary => Err(ResolveError::UnsupportedRepresentation {
                class: node.qualified_name.clone(),
                kind: ClassKind::OpaqueBinary.as_str(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::types::PrimitiveTy;

    fn int() -> Ty {
        Ty::primitive(PrimitiveTy::Int)
    }

    #[test]
    fn test_new_graph_has_root() {
        let graph = ClassGraph::new();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.class_named(DEFAULT_ROOT_NAME), Some(ClassId::ROOT));
        assert_eq!(graph.superclass_not_root(ClassId::ROOT), None);
        assert_eq!(graph.kind(ClassId::ROOT), Some(ClassKind::SourceDefined));
    }

    #[test]
    fn test_custom_root_name() {
        let mut graph = ClassGraph::with_root_name("java.lang.Object");
        let string = graph.declare(ClassDecl::binary("java.lang.String", Vec::new())).unwrap();

        assert_eq!(graph.class_named("java.lang.Object"), Some(graph.root()));
        assert_eq!(graph.get(string).unwrap().superclass(), Some(graph.root()));
        assert_eq!(graph.kind(string), Some(ClassKind::BinaryDefined));
        assert_eq!(graph.classes().count(), 2);
    }

    #[test]
    fn test_superclass_not_root() {
        let mut graph = ClassGraph::new();
        let base = graph.declare(ClassDecl::source("Base", Vec::new())).unwrap();
        let derived = graph
            .declare(ClassDecl::source("Derived", Vec::new()).extends(base))
            .unwrap();

        assert_eq!(graph.superclass_not_root(derived), Some(base));
        assert_eq!(graph.superclass_not_root(base), None);
        assert_eq!(graph.get(base).unwrap().superclass(), Some(ClassId::ROOT));
    }

    #[test]
    fn test_declare_rejects_invalid_names() {
        let mut graph = ClassGraph::new();
        assert_eq!(
            graph.declare(ClassDecl::source("1Bad", Vec::new())),
            Err(GraphError::InvalidClassName("1Bad".into()))
        );
        assert_eq!(
            graph.declare(ClassDecl::source("Point", vec![SourceFieldDecl::val("x y", int())])),
            Err(GraphError::InvalidFieldName { class: "Point".into(), field: "x y".into() })
        );
    }

    #[test]
    fn test_declare_reports_method_and_type_param_names() {
        let mut graph = ClassGraph::new();
        assert_eq!(
            graph.declare(ClassDecl::source("Box", Vec::new()).with_type_params(["1T"])),
            Err(GraphError::InvalidTypeParam { class: "Box".into(), param: "1T".into() })
        );
        assert_eq!(
            graph.declare(ClassDecl::binary_with_methods(
                "org.example.Counter",
                Vec::new(),
                vec![RawMethodDecl::new("<init>", RawType::Primitive(PrimitiveTy::Void))],
            )),
            Err(GraphError::InvalidMethodName {
                class: "org.example.Counter".into(),
                method: "<init>".into(),
            })
        );
    }

    #[test]
    fn test_binary_fields_accept_jvm_member_names() {
        let mut graph = ClassGraph::new();
        let color = graph
            .declare(ClassDecl::binary(
                "org.example.Color",
                vec![
                    RawFieldDecl::new("RED", RawType::class("org.example.Color")).with_enum_entry(),
                    RawFieldDecl::new(
                        "$VALUES",
                        RawType::array(RawType::class("org.example.Color")),
                    )
                    .with_static()
                    .with_final(),
                    RawFieldDecl::new(
                        "$assertionsDisabled",
                        RawType::Primitive(PrimitiveTy::Boolean),
                    )
                    .with_static()
                    .with_final(),
                ],
            ))
            .unwrap();

        let DeclaredFields::Binary(fields) = graph.declared_fields(color).unwrap() else {
            panic!("expected binary fields");
        };
        assert_eq!(fields.len(), 3);
        assert_eq!(graph.name_str(fields[1].name), "$VALUES");

        assert_eq!(
            graph.declare(ClassDecl::binary(
                "org.example.Bad",
                vec![RawFieldDecl::new("a;b", RawType::Primitive(PrimitiveTy::Int))],
            )),
            Err(GraphError::InvalidFieldName {
                class: "org.example.Bad".into(),
                field: "a;b".into(),
            })
        );
    }

    #[test]
    fn test_declare_rejects_duplicates() {
        let mut graph = ClassGraph::new();
        graph.declare(ClassDecl::source("Point", Vec::new())).unwrap();
        assert_eq!(
            graph.declare(ClassDecl::source("Point", Vec::new())),
            Err(GraphError::DuplicateClass("Point".into()))
        );
        assert_eq!(
            graph.declare(ClassDecl::binary(
                "Pair",
                vec![
                    RawFieldDecl::new("a", RawType::Primitive(PrimitiveTy::Int)),
                    RawFieldDecl::new("a", RawType::Primitive(PrimitiveTy::Long)),
                ],
            )),
            Err(GraphError::DuplicateField { class: "Pair".into(), field: "a".into() })
        );
    }

    #[test]
    fn test_declare_rejects_unknown_superclass() {
        let mut graph = ClassGraph::new();
        assert_eq!(
            graph.declare(ClassDecl::source("Orphan", Vec::new()).extends(ClassId::new(42))),
            Err(GraphError::UnknownSuperclass {
                class: "Orphan".into(),
                superclass: ClassId::new(42),
            })
        );
    }

    #[test]
    fn test_declared_fields_per_representation() {
        let mut graph = ClassGraph::new();
        let point = graph
            .declare(ClassDecl::source("Point", vec![SourceFieldDecl::var("x", int())]))
            .unwrap();
        let list = graph
            .declare(ClassDecl::binary(
                "java.util.ArrayList",
                vec![RawFieldDecl::new("size", RawType::Primitive(PrimitiveTy::Int))],
            ))
            .unwrap();
        let thread = graph.declare(ClassDecl::opaque_binary("java.lang.Thread")).unwrap();

        assert!(matches!(
            graph.declared_fields(point),
            Ok(DeclaredFields::Source(f)) if f.len() == 1
        ));
        assert!(matches!(
            graph.declared_fields(list),
            Ok(DeclaredFields::Binary(f)) if f.len() == 1
        ));
        assert!(matches!(
            graph.declared_fields(thread),
            Err(ResolveError::UnsupportedRepresentation { .. })
        ));
        assert_eq!(
            graph.declared_fields(ClassId::new(99)).err(),
            Some(ResolveError::UnknownClass(ClassId::new(99)))
        );
    }

    #[test]
    fn test_default_type_uses_type_params() {
        let mut graph = ClassGraph::new();
        let pair = graph
            .declare(ClassDecl::source("Pair", Vec::new()).with_type_params(["A", "B"]))
            .unwrap();

        assert_eq!(
            graph.get(pair).unwrap().default_type(),
            Ty::class(
                pair,
                vec![
                    TypeArg::Type(Ty::Param("A".into())),
                    TypeArg::Type(Ty::Param("B".into())),
                ]
            )
        );
    }

    #[test]
    fn test_enum_entry_implies_static_final() {
        let mut graph = ClassGraph::new();
        let color = graph
            .declare(ClassDecl::binary(
                "Color",
                vec![RawFieldDecl::new("RED", RawType::class("Color")).with_enum_entry()],
            ))
            .unwrap();

        let Ok(DeclaredFields::Binary(fields)) = graph.declared_fields(color) else {
            panic!("expected binary fields");
        };
        assert!(fields[0].is_enum_entry && fields[0].is_static && fields[0].is_final);
    }
}
