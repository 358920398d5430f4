//! Settings for a field synthesis pass.

use smol_str::SmolStr;

/// Default limit on how many classes one hierarchy walk may visit.
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 256;

/// Tunables for [`DebuggerFieldScope`](super::DebuggerFieldScope).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Walks that visit more classes than this fail with
    /// [`ResolveError::HierarchyTooDeep`](super::ResolveError::HierarchyTooDeep).
    pub max_hierarchy_depth: usize,
    /// Origin label for fields of source-defined classes.
    pub backing_field_label: SmolStr,
    /// Origin label for fields of binary-defined classes.
    pub external_field_label: SmolStr,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_hierarchy_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
            backing_field_label: SmolStr::new_static("backing field"),
            external_field_label: SmolStr::new_static("external field"),
        }
    }
}

impl SynthesisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    /// Replace both origin labels, e.g. with localized text.
    pub fn with_labels(
        mut self,
        backing_field: impl Into<SmolStr>,
        external_field: impl Into<SmolStr>,
    ) -> Self {
        self.backing_field_label = backing_field.into();
        self.external_field_label = external_field.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthesisConfig::default();
        assert_eq!(config.max_hierarchy_depth, DEFAULT_MAX_HIERARCHY_DEPTH);
        assert_eq!(config.backing_field_label, "backing field");
        assert_eq!(config.external_field_label, "external field");
    }

    #[test]
    fn test_config_builders() {
        let config = SynthesisConfig::new()
            .with_max_hierarchy_depth(4)
            .with_labels("Backing-Feld", "Externes Feld");
        assert_eq!(config.max_hierarchy_depth, 4);
        assert_eq!(config.backing_field_label, "Backing-Feld");
        assert_eq!(config.external_field_label, "Externes Feld");
    }
}
