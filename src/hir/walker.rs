//! Superclass walk collecting synthetic descriptors.
//!
//! Starting at the receiver's class, every class up to (but excluding) the
//! root contributes descriptors for its fields. A name that is already
//! collected is skipped, so a field declared in a subclass shadows any
//! same-named field further up.
//!
//! Per class:
//!
//! - **Binary-defined**: fields whose name the [`ExtensionPropertyNames`]
//!   resolver exposes on that class, excluding static fields and enum
//!   entries. Types go through the [`TypeTransformer`] and are then
//!   star-projected.
//! - **Source-defined**: every field with a backing storage slot.
//! - **Opaque binary**: the walk fails with
//!   [`ResolveError::UnsupportedRepresentation`].

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::base::Name;

use super::config::SynthesisConfig;
use super::descriptor::{SyntheticDescriptor, SyntheticField, build_descriptor};
use super::error::{ResolveError, ResolveResult};
use super::graph::{ClassGraph, ClassNode, DeclaredFields, RawField, SourceField};
use super::ids::ClassId;
use super::names::ExtensionPropertyNames;
use super::source::SourceElementFactory;
use super::types::TypeTransformer;

/// Descriptors in discovery order, keyed by field name.
pub type FieldMap = IndexMap<Name, SyntheticDescriptor>;

/// Walks a class and its superclasses, building descriptors.
pub struct HierarchyWalker<'a> {
    graph: &'a ClassGraph,
    names: &'a dyn ExtensionPropertyNames,
    types: &'a dyn TypeTransformer,
    sources: &'a dyn SourceElementFactory,
    config: &'a SynthesisConfig,
}

impl<'a> HierarchyWalker<'a> {
    pub fn new(
        graph: &'a ClassGraph,
        names: &'a dyn ExtensionPropertyNames,
        types: &'a dyn TypeTransformer,
        sources: &'a dyn SourceElementFactory,
        config: &'a SynthesisConfig,
    ) -> Self {
        Self { graph, names, types, sources, config }
    }

    /// Collect descriptors for `start` and its superclasses.
    #[tracing::instrument(level = "debug", skip(self), fields(class = start.index()))]
    pub fn walk(&self, start: ClassId) -> ResolveResult<FieldMap> {
        let mut collected = FieldMap::default();
        let mut current = Some(start);
        let mut depth = 0;

        while let Some(id) = current {
            if id.is_root() {
                break;
            }

            depth += 1;
            if depth > self.config.max_hierarchy_depth {
                let err = ResolveError::HierarchyTooDeep {
                    class: self.qualified_name(start),
                    limit: self.config.max_hierarchy_depth,
                };
                tracing::error!(error = %err, "aborting field synthesis");
                return Err(err);
            }

            let node = self.graph.get(id).ok_or(ResolveError::UnknownClass(id))?;
            match self.graph.declared_fields(id) {
                Ok(DeclaredFields::Binary(fields)) => {
                    self.collect_binary(node, fields, &mut collected)
                }
                Ok(DeclaredFields::Source(fields)) => {
                    self.collect_source(node, fields, &mut collected)
                }
                Err(err) => {
                    tracing::error!(error = %err, "aborting field synthesis");
                    return Err(err);
                }
            }

            current = self.graph.superclass_not_root(id);
        }

        tracing::debug!(count = collected.len(), depth, "collected synthetic fields");
        Ok(collected)
    }

    fn collect_source(&self, owner: &ClassNode, fields: &[SourceField], collected: &mut FieldMap) {
        for field in fields.iter().filter(|f| f.has_backing_field) {
            let Entry::Vacant(slot) = collected.entry(field.name) else {
                continue;
            };
            tracing::trace!(
                class = owner.qualified_name(),
                field = %self.graph.name_str(field.name),
                "backing field"
            );

            slot.insert(build_descriptor(
                self.graph,
                owner,
                SyntheticField {
                    name: field.name,
                    ty: field.ty.clone(),
                    is_var: field.is_var,
                    source: field.source.clone(),
                },
                self.config.backing_field_label.clone(),
            ));
        }
    }

    fn collect_binary(&self, owner: &ClassNode, fields: &[RawField], collected: &mut FieldMap) {
        if fields.is_empty() {
            return;
        }
        let eligible = self.names.names_for(self.graph, owner.id());

        for field in fields {
            if field.is_enum_entry || field.is_static || !eligible.contains(&field.name) {
                continue;
            }
            let Entry::Vacant(slot) = collected.entry(field.name) else {
                continue;
            };
            tracing::trace!(
                class = owner.qualified_name(),
                field = %self.graph.name_str(field.name),
                "external field"
            );

            let ty = self.types.transform(self.graph, &field.ty).star_projected();
            slot.insert(build_descriptor(
                self.graph,
                owner,
                SyntheticField {
                    name: field.name,
                    ty,
                    is_var: !field.is_final,
                    source: self.sources.source(owner, field),
                },
                self.config.external_field_label.clone(),
            ));
        }
    }

    fn qualified_name(&self, id: ClassId) -> smol_str::SmolStr {
        self.graph
            .get(id)
            .map(|node| node.qualified_name().into())
            .unwrap_or_else(|| format!("{id:?}").into())
    }
}
