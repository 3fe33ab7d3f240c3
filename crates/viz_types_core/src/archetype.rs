use std::marker::PhantomData;
use std::sync::Arc;

use arrow::array::NullArray;
use arrow::datatypes::DataType;

use crate::macros::declare_name_type;
use crate::{
    ComponentBatch, ComponentDescriptor, ComponentName, SerializationContext,
    SerializationResult,
};

// ---

declare_name_type!(
    /// The fully-qualified name of an archetype, e.g. `viz.archetypes.Points3D`.
    ArchetypeName
);

impl ArchetypeName {
    /// Returns the fully-qualified name, e.g. `viz.archetypes.Points3D`.
    #[inline]
    pub fn full_name(&self) -> &str {
        self.as_str()
    }

    /// Returns the unqualified name, e.g. `Points3D`.
    #[inline]
    pub fn short_name(&self) -> &str {
        let full_name = self.as_str();
        if let Some(short_name) = full_name.strip_prefix("viz.archetypes.") {
            short_name
        } else if let Some(short_name) = full_name.strip_prefix("viz.") {
            short_name
        } else {
            full_name
        }
    }
}

declare_name_type!(
    /// The name of a field within an archetype, e.g. `positions`.
    ArchetypeFieldName
);

// ---

/// An archetype is a logical collection of component batches that play well
/// with each other.
///
/// Implementers also implement [`crate::AsComponents`], which is where the
/// field ordering, the skipping of absent optional fields and the appending of
/// the indicator batch actually happen.
pub trait Archetype {
    /// The fully-qualified name of this archetype, e.g. `viz.archetypes.Points3D`.
    fn name() -> ArchetypeName;

    /// Readable name for displaying in UIs and error messages.
    fn display_name() -> &'static str;

    /// The indicator component for this archetype, covering `num_rows` logical rows.
    #[inline]
    fn indicator(num_rows: usize) -> GenericIndicatorComponent<Self>
    where
        Self: Sized,
    {
        GenericIndicatorComponent::new(num_rows)
    }
}

/// A zero-byte marker batch associated 1:1 with the archetype `A`, used to tag
/// which archetype produced a group of component batches.
///
/// Carries no data besides its row count; serialized as an arrow null array.
#[derive(Clone, Debug)]
pub struct GenericIndicatorComponent<A: Archetype> {
    num_rows: usize,
    _phantom: PhantomData<A>,
}

impl<A: Archetype> GenericIndicatorComponent<A> {
    #[inline]
    pub fn new(num_rows: usize) -> Self {
        Self {
            num_rows,
            _phantom: PhantomData,
        }
    }

    /// The descriptor of this indicator, e.g. `viz.components.Points3DIndicator`.
    #[inline]
    pub fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new(ComponentName::new(format!(
            "viz.components.{}Indicator",
            A::name().short_name()
        )))
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Registers the indicator's component type and packages it as a batch.
    pub fn to_batch(&self, ctx: &SerializationContext<'_>) -> SerializationResult<ComponentBatch> {
        let descriptor = Self::descriptor();
        let component_type = ctx.register(&descriptor, &DataType::Null)?;
        Ok(ComponentBatch::from_parts(
            Arc::new(NullArray::new(self.num_rows)),
            descriptor,
            component_type,
        ))
    }
}
