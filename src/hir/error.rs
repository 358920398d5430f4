//! Error types for graph construction and field resolution.

use smol_str::SmolStr;
use thiserror::Error;

use super::ids::ClassId;

/// Errors raised while declaring classes in a [`ClassGraph`](super::ClassGraph).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid class name `{0}`")]
    InvalidClassName(SmolStr),

    #[error("invalid field name `{field}` in class `{class}`")]
    InvalidFieldName { class: SmolStr, field: SmolStr },

    #[error("invalid method name `{method}` in class `{class}`")]
    InvalidMethodName { class: SmolStr, method: SmolStr },

    #[error("invalid type parameter `{param}` in class `{class}`")]
    InvalidTypeParam { class: SmolStr, param: SmolStr },

    #[error("cannot declare `{0}`: the graph is full")]
    TooManyClasses(SmolStr),

    #[error("class `{0}` is already declared")]
    DuplicateClass(SmolStr),

    #[error("field `{field}` is declared twice in class `{class}`")]
    DuplicateField { class: SmolStr, field: SmolStr },

    #[error("superclass {superclass:?} of `{class}` is not part of this graph")]
    UnknownSuperclass { class: SmolStr, superclass: ClassId },
}

/// Contract violations detected during a resolution pass.
///
/// None of these is caused by the evaluated expression. Each one means the
/// host wired up a graph the engine cannot walk, and the whole pass is
/// abandoned rather than returning a partial result.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("class `{class}` has an unsupported representation: {kind}")]
    UnsupportedRepresentation { class: SmolStr, kind: &'static str },

    #[error("class {0:?} is not part of this graph")]
    UnknownClass(ClassId),

    #[error("hierarchy of `{class}` is deeper than {limit} classes")]
    HierarchyTooDeep { class: SmolStr, limit: usize },
}

pub type ResolveResult<T> = Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ResolveError::UnsupportedRepresentation {
            class: "java.lang.Thread".into(),
            kind: "opaque binary class",
        };
        assert_eq!(
            err.to_string(),
            "class `java.lang.Thread` has an unsupported representation: opaque binary class"
        );

        let err = GraphError::DuplicateField { class: "Point".into(), field: "x".into() };
        assert_eq!(err.to_string(), "field `x` is declared twice in class `Point`");

        let err = GraphError::InvalidMethodName { class: "Point".into(), method: "<init>".into() };
        assert_eq!(err.to_string(), "invalid method name `<init>` in class `Point`");

        let err = GraphError::TooManyClasses("Point".into());
        assert_eq!(err.to_string(), "cannot declare `Point`: the graph is full");
    }
}
