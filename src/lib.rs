//! # fieldsynth
//!
//! Synthetic properties for raw backing fields, used by a debugger's
//! expression evaluator.
//!
//! Given a class hierarchy that mixes source-defined and binary-defined
//! classes, the engine exposes each field as an extension property named
//! `<field>_field`, so evaluated code can read and write fields that have
//! no accessor of their own.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! hir   → Class graph, name index, hierarchy walk, descriptors, entry scope
//!   ↓
//! base  → Primitives (FileId, Name interning, TextRange)
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::path::Path;
//! use fieldsynth::TextRange;
//! use fieldsynth::hir::{
//!     ClassDecl, ClassGraph, DebuggerFieldScope, FileSet, LookupLocation, PrimitiveTy,
//!     SourceFieldDecl, TargetPlatform, Ty,
//! };
//!
//! let mut graph = ClassGraph::new();
//! let int = Ty::primitive(PrimitiveTy::Int);
//! let point = graph
//!     .declare(ClassDecl::source(
//!         "Point",
//!         vec![SourceFieldDecl::var("x", int.clone()), SourceFieldDecl::val("y", int)],
//!     ))
//!     .unwrap();
//!
//! let files = FileSet::new();
//! let fragment = files.code_fragment(Path::new("/fragment.kt"), TargetPlatform::Jvm, true);
//! let location = LookupLocation::element(fragment, TextRange::default());
//!
//! let scope = DebuggerFieldScope::new(&graph, &files);
//! let props = scope.synthetic_properties(&[Ty::simple(point)], &location).unwrap();
//! assert_eq!(props.len(), 2);
//! ```

/// Foundation types: FileId, Name interning, TextRange
pub mod base;

/// Class graph and synthetic field resolution
pub mod hir;

pub use base::{FileId, Interner, Name, TextRange, TextSize};
