//! Foundation types for field synthesis.
//!
//! This module provides the primitives the class graph is built from:
//! - [`FileId`] - Handles for files known to the evaluator
//! - [`Name`], [`Interner`] - Interned identifiers
//! - [`TextRange`], [`TextSize`] - Source positions used for attribution
//!
//! This module has NO dependencies on other fieldsynth modules.

mod file_id;
mod intern;

pub use file_id::FileId;
pub use intern::{Interner, Name, is_identifier, is_jvm_member_name, is_qualified_identifier};

pub use text_size::{TextRange, TextSize};

// Re-export text-size for hosts that build ranges themselves
pub use text_size;
