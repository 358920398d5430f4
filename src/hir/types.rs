//! Type model: resolved types, raw binary types, and the transformation
//! between them.
//!
//! Source classes carry [`Ty`]s that are already resolved. Binary classes
//! only carry [`RawType`]s as read from class-file metadata; a
//! [`TypeTransformer`] turns those into `Ty`s when a field is synthesized.

use smol_str::SmolStr;

use super::graph::ClassGraph;
use super::ids::ClassId;

/// Built-in value types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveTy {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Only valid as a method return type.
    Void,
}

impl PrimitiveTy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveTy::Boolean => "boolean",
            PrimitiveTy::Byte => "byte",
            PrimitiveTy::Char => "char",
            PrimitiveTy::Short => "short",
            PrimitiveTy::Int => "int",
            PrimitiveTy::Long => "long",
            PrimitiveTy::Float => "float",
            PrimitiveTy::Double => "double",
            PrimitiveTy::Void => "void",
        }
    }
}

/// A type argument: either a concrete type or a star projection (`*`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Star,
    Type(Ty),
}

/// A resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Primitive(PrimitiveTy),
    /// A class type with its arguments, one per type parameter.
    Class { class: ClassId, args: Vec<TypeArg> },
    Array(Box<TypeArg>),
    /// A type parameter of the enclosing class.
    Param(SmolStr),
    /// A class name the graph does not know about.
    Unresolved(SmolStr),
}

impl Ty {
    /// A class type without type arguments.
    pub fn simple(class: ClassId) -> Self {
        Ty::Class { class, args: Vec::new() }
    }

    pub fn class(class: ClassId, args: Vec<TypeArg>) -> Self {
        Ty::Class { class, args }
    }

    pub fn primitive(primitive: PrimitiveTy) -> Self {
        Ty::Primitive(primitive)
    }

    /// The class this type is built on, if it is a class type.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Ty::Class { class, .. } => Some(*class),
            _ => None,
        }
    }

    /// Replace every top-level type argument with `*`.
    ///
    /// Arrays of primitives keep their element type since `*` would lose
    /// the storage layout.
    pub fn star_projected(&self) -> Ty {
        match self {
            Ty::Class { class, args } => Ty::Class {
                class: *class,
                args: vec![TypeArg::Star; args.len()],
            },
            Ty::Array(elem) => match elem.as_ref() {
                TypeArg::Type(Ty::Primitive(_)) => self.clone(),
                _ => Ty::Array(Box::new(TypeArg::Star)),
            },
            other => other.clone(),
        }
    }

    /// Returns true if no argument of this type is a concrete type.
    pub fn is_star_projected(&self) -> bool {
        match self {
            Ty::Class { args, .. } => args.iter().all(|arg| matches!(arg, TypeArg::Star)),
            Ty::Array(elem) => matches!(
                elem.as_ref(),
                TypeArg::Star | TypeArg::Type(Ty::Primitive(_))
            ),
            _ => true,
        }
    }
}

/// A field or return type exactly as it appears in binary metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RawType {
    Primitive(PrimitiveTy),
    /// A class reference by qualified name, with raw arguments. A raw
    /// (un-parameterized) use of a generic class has no arguments.
    Class { name: SmolStr, args: Vec<RawType> },
    Array(Box<RawType>),
    /// A type variable such as `T`.
    Variable(SmolStr),
    /// The `?` wildcard, only meaningful as a type argument.
    Wildcard,
}

impl RawType {
    pub fn class(name: impl Into<SmolStr>) -> Self {
        RawType::Class { name: name.into(), args: Vec::new() }
    }

    pub fn generic(name: impl Into<SmolStr>, args: Vec<RawType>) -> Self {
        RawType::Class { name: name.into(), args }
    }

    pub fn array(elem: RawType) -> Self {
        RawType::Array(Box::new(elem))
    }
}

/// Converts raw binary types into resolved types.
pub trait TypeTransformer {
    fn transform(&self, graph: &ClassGraph, raw: &RawType) -> Ty;
}

/// Resolves class references by qualified name against the graph.
///
/// Unknown classes become [`Ty::Unresolved`]. Raw uses of generic classes
/// and `?` arguments become `*`. A bare `?` at the top level stands for the
/// root class.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTypeTransformer;

impl DefaultTypeTransformer {
    fn transform_arg(&self, graph: &ClassGraph, raw: &RawType) -> TypeArg {
        match raw {
            RawType::Wildcard => TypeArg::Star,
            other => TypeArg::Type(self.transform(graph, other)),
        }
    }
}

impl TypeTransformer for DefaultTypeTransformer {
    fn transform(&self, graph: &ClassGraph, raw: &RawType) -> Ty {
        match raw {
            RawType::Primitive(p) => Ty::Primitive(*p),
            RawType::Class { name, args } => {
                let Some(class) = graph.class_named(name) else {
                    return Ty::Unresolved(name.clone());
                };
                let arity = graph.get(class).map_or(0, |node| node.type_params().len());
                let args = if args.len() == arity {
                    args.iter().map(|arg| self.transform_arg(graph, arg)).collect()
                } else {
                    vec![TypeArg::Star; arity]
                };
                Ty::Class { class, args }
            }
            RawType::Array(elem) => Ty::Array(Box::new(self.transform_arg(graph, elem))),
            RawType::Variable(name) => Ty::Param(name.clone()),
            RawType::Wildcard => Ty::simple(ClassId::ROOT),
        }
    }
}
