//! Synthetic property descriptors for raw backing fields.
//!
//! A [`SyntheticDescriptor`] looks like an extension property declared on
//! the field's owner class. Its internal name is the field name followed by
//! [`FIELD_SUFFIX`], so `count` becomes `count_field` and never collides
//! with a real property called `count`. The suffix is part of the symbol's
//! identity only: labels shown to the user are built from
//! [`SyntheticDescriptor::field_name`] and the origin description.

use smol_str::SmolStr;

use crate::base::Name;

use super::graph::{ClassGraph, ClassNode};
use super::ids::ClassId;
use super::source::SourceElement;
use super::types::{PrimitiveTy, Ty};

/// Appended to the field name to form the synthesized symbol's name.
pub const FIELD_SUFFIX: &str = "_field";

/// Name of the setter's single parameter.
pub const SETTER_PARAMETER_NAME: &str = "value";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modality {
    Final,
    Open,
    Abstract,
}

/// Whether a member was written by a user or produced by tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Declaration,
    Synthesized,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueParameter {
    pub name: Name,
    pub index: u32,
    pub ty: Ty,
    pub source: SourceElement,
}

/// A getter or setter of a synthetic property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub visibility: Visibility,
    pub modality: Modality,
    pub member_kind: MemberKind,
    pub return_type: Ty,
    /// Present on setters only.
    pub value_parameter: Option<ValueParameter>,
    pub source: SourceElement,
}

/// The field data a descriptor is built from, already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticField {
    pub name: Name,
    pub ty: Ty,
    pub is_var: bool,
    pub source: SourceElement,
}

/// A property-like symbol exposing one raw field to evaluated code.
///
/// Invariant: [`setter`](Self::setter) is `Some` iff [`is_var`](Self::is_var).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticDescriptor {
    owner: ClassId,
    field_name: Name,
    name: Name,
    description: SmolStr,
    is_var: bool,
    ty: Ty,
    receiver: Ty,
    getter: Accessor,
    setter: Option<Accessor>,
    source: SourceElement,
}

impl SyntheticDescriptor {
    /// The class declaring the field.
    pub fn owner(&self) -> ClassId {
        self.owner
    }

    /// The raw field name, as shown to the user.
    pub fn field_name(&self) -> Name {
        self.field_name
    }

    /// The symbol name: field name plus [`FIELD_SUFFIX`].
    pub fn name(&self) -> Name {
        self.name
    }

    /// Human-readable origin ("backing field", "external field").
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_var(&self) -> bool {
        self.is_var
    }

    pub fn ty(&self) -> &Ty {
        &self.ty
    }

    /// The extension receiver: the owner's type with `*` arguments.
    pub fn receiver(&self) -> &Ty {
        &self.receiver
    }

    pub fn getter(&self) -> &Accessor {
        &self.getter
    }

    pub fn setter(&self) -> Option<&Accessor> {
        self.setter.as_ref()
    }

    pub fn source(&self) -> &SourceElement {
        &self.source
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::Public
    }

    pub fn modality(&self) -> Modality {
        Modality::Final
    }

    pub fn member_kind(&self) -> MemberKind {
        MemberKind::Synthesized
    }

    /// User-facing label, e.g. `count (external field)`.
    pub fn label(&self, graph: &ClassGraph) -> String {
        format!("{} ({})", graph.name_str(self.field_name), self.description)
    }
}

/// Build the descriptor for `field` declared in `owner`.
pub fn build_descriptor(
    graph: &ClassGraph,
    owner: &ClassNode,
    field: SyntheticField,
    description: SmolStr,
) -> SyntheticDescriptor {
    let SyntheticField { name: field_name, ty, is_var, source } = field;

    let symbol_name = format!("{}{}", graph.name_str(field_name), FIELD_SUFFIX);
    let receiver = owner.default_type().star_projected();

    let getter = Accessor {
        kind: AccessorKind::Getter,
        visibility: Visibility::Public,
        modality: Modality::Final,
        member_kind: MemberKind::Synthesized,
        return_type: ty.clone(),
        value_parameter: None,
        source: source.clone(),
    };

    let setter = is_var.then(|| Accessor {
        kind: AccessorKind::Setter,
        visibility: Visibility::Public,
        modality: Modality::Final,
        member_kind: MemberKind::Synthesized,
        return_type: Ty::Primitive(PrimitiveTy::Void),
        value_parameter: Some(ValueParameter {
            name: graph.intern(SETTER_PARAMETER_NAME),
            index: 0,
            ty: ty.clone(),
            source: source.clone(),
        }),
        source: source.clone(),
    });

    SyntheticDescriptor {
        owner: owner.id(),
        field_name,
        name: graph.intern(&symbol_name),
        description,
        is_var,
        ty,
        receiver,
        getter,
        setter,
        source,
    }
}
