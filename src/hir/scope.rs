//! Entry point used by the debugger's expression resolver.
//!
//! [`DebuggerFieldScope`] answers "which synthetic field properties exist on
//! these receiver types?" for lookups coming from evaluated code. Outside a
//! runtime-type evaluation fragment, or on a platform without raw field
//! access, it answers with nothing.

use super::config::SynthesisConfig;
use super::descriptor::SyntheticDescriptor;
use super::error::ResolveResult;
use super::graph::ClassGraph;
use super::names::{AccessorPropertyNames, ExtensionPropertyNames};
use super::source::{ExternalSourceFactory, FileSet, LookupLocation, SourceElementFactory};
use super::types::{DefaultTypeTransformer, Ty, TypeTransformer};
use super::walker::HierarchyWalker;

/// Returns true if a lookup at `location` may see synthetic field properties.
///
/// Requires an element inside a still-valid file that targets the JVM or
/// common platform and is a code fragment flagged for runtime-type
/// evaluation. Any missing piece answers `false`.
pub fn is_applicable(location: &LookupLocation, files: &FileSet) -> bool {
    let Some(file) = location.file() else {
        return false;
    };
    let Some(info) = files.info(file) else {
        return false;
    };

    info.valid && info.platform.supports_field_access() && info.kind.is_runtime_evaluated_fragment()
}

/// Synthetic scope exposing raw fields as `<name>_field` properties.
pub struct DebuggerFieldScope<'a> {
    graph: &'a ClassGraph,
    files: &'a FileSet,
    names: &'a dyn ExtensionPropertyNames,
    types: &'a dyn TypeTransformer,
    sources: &'a dyn SourceElementFactory,
    config: SynthesisConfig,
}

impl<'a> DebuggerFieldScope<'a> {
    /// A scope using accessor-derived names and the default collaborators.
    pub fn new(graph: &'a ClassGraph, files: &'a FileSet) -> Self {
        Self {
            graph,
            files,
            names: &AccessorPropertyNames,
            types: &DefaultTypeTransformer,
            sources: &ExternalSourceFactory,
            config: SynthesisConfig::default(),
        }
    }

    pub fn with_property_names(mut self, names: &'a dyn ExtensionPropertyNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_type_transformer(mut self, types: &'a dyn TypeTransformer) -> Self {
        self.types = types;
        self
    }

    pub fn with_source_factory(mut self, sources: &'a dyn SourceElementFactory) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// All synthetic properties of `receivers`, in receiver order.
    ///
    /// Receivers that are not class types contribute nothing. Each receiver
    /// is walked independently, so two receivers sharing a superclass both
    /// report its fields.
    #[tracing::instrument(level = "debug", skip_all, fields(receivers = receivers.len()))]
    pub fn synthetic_properties(
        &self,
        receivers: &[Ty],
        location: &LookupLocation,
    ) -> ResolveResult<Vec<SyntheticDescriptor>> {
        if !is_applicable(location, self.files) {
            return Ok(Vec::new());
        }

        let walker =
            HierarchyWalker::new(self.graph, self.names, self.types, self.sources, &self.config);
        let mut result = Vec::new();
        for class in receivers.iter().filter_map(Ty::class_id) {
            result.extend(walker.walk(class)?.into_values());
        }
        Ok(result)
    }

    /// Synthetic properties of `receivers` whose symbol name is `name`.
    ///
    /// `name` is the suffixed symbol name as written in evaluated code
    /// (`count_field`), not the raw field name.
    pub fn synthetic_properties_named(
        &self,
        receivers: &[Ty],
        name: &str,
        location: &LookupLocation,
    ) -> ResolveResult<Vec<SyntheticDescriptor>> {
        let mut result = self.synthetic_properties(receivers, location)?;
        result.retain(|desc| self.graph.name_str(desc.name()) == name);
        Ok(result)
    }
}
