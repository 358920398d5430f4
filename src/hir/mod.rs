//! Class hierarchy model and synthetic field resolution.
//!
//! ## Key Data Structures
//!
//! - [`ClassGraph`] - Arena of source- and binary-defined classes
//! - [`HierarchyWalker`] - Superclass walk producing one descriptor per field name
//! - [`SyntheticDescriptor`] - Getter/setter symbol exposing a raw field
//! - [`DebuggerFieldScope`] - Entry point gated on the lookup location

mod config;
mod descriptor;
mod error;
mod graph;
mod ids;
mod names;
mod scope;
mod source;
mod types;
mod walker;

pub use config::{DEFAULT_MAX_HIERARCHY_DEPTH, SynthesisConfig};
pub use descriptor::{
    Accessor, AccessorKind, FIELD_SUFFIX, MemberKind, Modality, SETTER_PARAMETER_NAME,
    SyntheticDescriptor, SyntheticField, ValueParameter, Visibility, build_descriptor,
};
pub use error::{GraphError, ResolveError, ResolveResult};
pub use graph::{
    ClassDecl, ClassGraph, ClassKind, ClassNode, ClassRepr, DEFAULT_ROOT_NAME, DeclaredFields,
    RawField, RawFieldDecl, RawMethod, RawMethodDecl, SourceField, SourceFieldDecl,
};
pub use ids::ClassId;
pub use names::{AccessorPropertyNames, ExtensionPropertyNames, FixedPropertyNames, NameSet};
pub use scope::{DebuggerFieldScope, is_applicable};
pub use source::{
    ExternalSourceFactory, FileInfo, FileKind, FileSet, LookupLocation, SourceElement,
    SourceElementFactory, TargetPlatform,
};
pub use types::{DefaultTypeTransformer, PrimitiveTy, RawType, Ty, TypeArg, TypeTransformer};
pub use walker::{FieldMap, HierarchyWalker};
