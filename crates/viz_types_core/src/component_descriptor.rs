use crate::{ArchetypeFieldName, ArchetypeName, ComponentName, SerializationError,
            SerializationResult};

/// A [`ComponentDescriptor`] fully describes the semantics of a column of data.
///
/// Every component is uniquely identified by its [`ComponentDescriptor`].
///
/// Invariant: `component_name` is always present; `archetype_name` and
/// `archetype_field_name` are jointly either both present (data logged through
/// an archetype field) or both absent (freestanding component). Use
/// [`Self::sanity_check`] to verify.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComponentDescriptor {
    /// Optional name of the archetype associated with this data.
    ///
    /// `None` if the data wasn't logged through an archetype.
    ///
    /// Example: `viz.archetypes.Points3D`.
    pub archetype_name: Option<ArchetypeName>,

    /// Optional name of the field within the archetype associated with this data.
    ///
    /// `None` if the data wasn't logged through an archetype.
    ///
    /// Example: `positions`.
    pub archetype_field_name: Option<ArchetypeFieldName>,

    /// Semantic name associated with this data.
    ///
    /// Example: `viz.components.Position3D`.
    pub component_name: ComponentName,
}

impl ComponentDescriptor {
    /// A freestanding component, not tied to any archetype.
    #[inline]
    pub fn new(component_name: impl Into<ComponentName>) -> Self {
        Self {
            archetype_name: None,
            archetype_field_name: None,
            component_name: component_name.into(),
        }
    }

    /// Unconditionally tags this descriptor with the given archetype and field.
    ///
    /// The two are always set together, preserving the jointly-present invariant.
    #[inline]
    pub fn with_archetype(
        mut self,
        archetype_name: impl Into<ArchetypeName>,
        archetype_field_name: impl Into<ArchetypeFieldName>,
    ) -> Self {
        self.archetype_name = Some(archetype_name.into());
        self.archetype_field_name = Some(archetype_field_name.into());
        self
    }

    /// Tags this descriptor with the given archetype and field, failing if it
    /// already carries a different attribution.
    ///
    /// A single raw value attributed to several archetype fields at once has no
    /// well-defined identity; rather than silently picking one, this is an error.
    pub fn retagged(
        self,
        archetype_name: impl Into<ArchetypeName>,
        archetype_field_name: impl Into<ArchetypeFieldName>,
    ) -> SerializationResult<Self> {
        let archetype_name = archetype_name.into();
        let archetype_field_name = archetype_field_name.into();

        let conflicting = self
            .archetype_name
            .as_ref()
            .is_some_and(|existing| *existing != archetype_name)
            || self
                .archetype_field_name
                .as_ref()
                .is_some_and(|existing| *existing != archetype_field_name);

        if conflicting {
            return Err(SerializationError::UnsupportedType {
                actual: self.to_string(),
                reason: format!(
                    "already attributed to {}:{}, cannot also attribute to {archetype_name}:{archetype_field_name}",
                    self.archetype_name.as_ref().map_or("<none>", |n| n.as_str()),
                    self.archetype_field_name.as_ref().map_or("<none>", |n| n.as_str()),
                ),
            });
        }

        Ok(self.with_archetype(archetype_name, archetype_field_name))
    }

    /// Runs some asserts in debug mode to make sure the descriptor is not weird.
    #[inline]
    #[track_caller]
    pub fn sanity_check(&self) {
        debug_assert!(
            self.archetype_name.is_some() == self.archetype_field_name.is_some(),
            "archetype_name and archetype_field_name must be jointly present or jointly absent, got {self:?}"
        );
    }

    /// A deterministic 64-bit hash combining all three fields, usable as a
    /// registry key.
    ///
    /// Equal descriptors always hash equal. Stable for the lifetime of the
    /// process.
    #[inline]
    pub fn hashed(&self) -> u64 {
        let Self {
            archetype_name,
            archetype_field_name,
            component_name,
        } = self;

        let archetype_name = archetype_name.as_ref().map_or(0, |name| name.hash64());
        let archetype_field_name = archetype_field_name
            .as_ref()
            .map_or(0, |name| name.hash64());
        let component_name = component_name.hash64();

        archetype_name ^ archetype_field_name ^ component_name
    }

    /// Returns the fully-qualified name, e.g.
    /// `viz.archetypes.Points3D:viz.components.Position3D#positions`.
    pub fn full_name(&self) -> String {
        let Self {
            archetype_name,
            archetype_field_name,
            component_name,
        } = self;

        match (archetype_name, archetype_field_name) {
            (None, None) => component_name.to_string(),
            (Some(archetype_name), Some(archetype_field_name)) => {
                format!("{archetype_name}:{component_name}#{archetype_field_name}")
            }
            // Unreachable through the public constructors, but printable anyway.
            (Some(archetype_name), None) => format!("{archetype_name}:{component_name}"),
            (None, Some(archetype_field_name)) => {
                format!("{component_name}#{archetype_field_name}")
            }
        }
    }
}

impl std::fmt::Display for ComponentDescriptor {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl std::hash::Hash for ComponentDescriptor {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // NOTE: This is a NoHash type, so we must respect the invariant that
        // `write_XX` is only called once.
        state.write_u64(self.hashed());
    }
}

impl nohash_hasher::IsEnabled for ComponentDescriptor {}

// ---

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_and_hashing() {
        let a = ComponentDescriptor::new("viz.components.Position3D")
            .with_archetype("viz.archetypes.Points3D", "positions");
        let b = ComponentDescriptor::new("viz.components.Position3D")
            .with_archetype("viz.archetypes.Points3D", "positions");

        assert_eq!(a, b);
        assert_eq!(a.hashed(), b.hashed());

        // Changing any one field changes the hash.
        let other_field = b.clone().with_archetype("viz.archetypes.Points3D", "centers");
        let other_archetype =
            b.clone().with_archetype("viz.archetypes.Boxes3D", "positions");
        let other_component = ComponentDescriptor::new("viz.components.Position2D")
            .with_archetype("viz.archetypes.Points3D", "positions");

        assert_ne!(a.hashed(), other_field.hashed());
        assert_ne!(a.hashed(), other_archetype.hashed());
        assert_ne!(a.hashed(), other_component.hashed());
        assert_ne!(
            a.hashed(),
            ComponentDescriptor::new("viz.components.Position3D").hashed()
        );
    }

    #[test]
    fn retagging_conflicts_are_errors() {
        let tagged = ComponentDescriptor::new("viz.components.Position3D")
            .with_archetype("viz.archetypes.Points3D", "positions");

        // Same attribution: fine.
        assert!(tagged
            .clone()
            .retagged("viz.archetypes.Points3D", "positions")
            .is_ok());

        // Conflicting attribution: explicit error, never silently resolved.
        let err = tagged
            .retagged("viz.archetypes.Boxes3D", "centers")
            .unwrap_err();
        assert!(matches!(
            err,
            SerializationError::UnsupportedType { .. }
        ));

        // Untagged descriptors can be tagged freely.
        assert!(ComponentDescriptor::new("viz.components.Position3D")
            .retagged("viz.archetypes.Points3D", "positions")
            .is_ok());
    }

    #[test]
    fn display_names() {
        let untagged = ComponentDescriptor::new("viz.components.Radius");
        assert_eq!(untagged.to_string(), "viz.components.Radius");

        let tagged = untagged.with_archetype("viz.archetypes.Points3D", "radii");
        assert_eq!(
            tagged.to_string(),
            "viz.archetypes.Points3D:viz.components.Radius#radii"
        );
    }
}
