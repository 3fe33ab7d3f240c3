use std::borrow::Cow;

use arrow::array::{Array as _, ArrayRef};
use arrow::datatypes::DataType;

use crate::{
    Collection, Component, ComponentColumn, ComponentDescriptor, ComponentTypeHandle,
    ComponentTypeRegistrar, ComponentTypeRegistry, SerializationError, SerializationResult,
    WireBatch,
};

// ---

/// Everything needed to resolve component types while serializing: the
/// process-local cache and the transport-side registration boundary.
#[derive(Clone, Copy)]
pub struct SerializationContext<'a> {
    pub registry: &'a ComponentTypeRegistry,
    pub registrar: &'a dyn ComponentTypeRegistrar,
}

impl<'a> SerializationContext<'a> {
    #[inline]
    pub fn new(
        registry: &'a ComponentTypeRegistry,
        registrar: &'a dyn ComponentTypeRegistrar,
    ) -> Self {
        Self {
            registry,
            registrar,
        }
    }

    /// Resolves the handle for `descriptor`, registering it on first sight.
    #[inline]
    pub fn register(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> SerializationResult<ComponentTypeHandle> {
        self.registry
            .get_or_register(descriptor, datatype, self.registrar)
    }
}

// ---

/// An array's worth of component instances, serialized and tagged with its
/// registered component type.
///
/// This is the atomic unit logged for one entity at one point in time.
/// Constructed per log call, consumed immediately by the transport or by
/// partitioning into a [`ComponentColumn`], never mutated after construction.
#[derive(Debug, Clone)]
pub struct ComponentBatch {
    /// The serialized data. `None` once taken for wire export.
    array: Option<ArrayRef>,

    descriptor: ComponentDescriptor,

    component_type: ComponentTypeHandle,

    /// Number of instances, stable even after the array has been taken.
    num_instances: usize,
}

impl ComponentBatch {
    /// Serializes a collection of components into a batch.
    ///
    /// Resolves (and lazily registers) the component type, then encodes the
    /// collection's elements. The encoder may read borrowed memory, but the
    /// resulting array owns its buffers: no reference to the collection
    /// survives this call.
    #[inline]
    pub fn from_collection<C: Component>(
        collection: &Collection<'_, C>,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Self> {
        Self::from_collection_with_descriptor(collection, C::descriptor(), ctx)
    }

    /// Same as [`Self::from_collection`], but with an explicit descriptor.
    ///
    /// This is how archetypes tag their fields: the descriptor carries the
    /// archetype name and field name on top of the component name.
    ///
    /// Attribution goes through [`ComponentDescriptor::retagged`]: a component
    /// whose canonical descriptor is already attributed to a different
    /// archetype field fails here, before anything is registered, rather than
    /// being silently re-tagged.
    pub fn from_collection_with_descriptor<C: Component>(
        collection: &Collection<'_, C>,
        descriptor: ComponentDescriptor,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Self> {
        let descriptor = if let (Some(archetype_name), Some(archetype_field_name)) = (
            descriptor.archetype_name.clone(),
            descriptor.archetype_field_name.clone(),
        ) {
            ComponentDescriptor {
                component_name: descriptor.component_name,
                ..C::descriptor().retagged(archetype_name, archetype_field_name)?
            }
        } else {
            descriptor
        };
        descriptor.sanity_check();

        let component_type = ctx.register(&descriptor, &C::arrow_datatype())?;
        let array = C::to_arrow(collection.iter().map(Cow::Borrowed))?;

        debug_assert_eq!(array.len(), collection.len());

        Ok(Self {
            num_instances: array.len(),
            array: Some(array),
            descriptor,
            component_type,
        })
    }

    /// Packages an already-serialized array.
    #[inline]
    pub fn from_parts(
        array: ArrayRef,
        descriptor: ComponentDescriptor,
        component_type: ComponentTypeHandle,
    ) -> Self {
        Self {
            num_instances: array.len(),
            array: Some(array),
            descriptor,
            component_type,
        }
    }

    /// Number of component instances in the batch.
    ///
    /// Always equals the originating collection's length.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_instances
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_instances == 0
    }

    #[inline]
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn component_type(&self) -> ComponentTypeHandle {
        self.component_type
    }

    /// The serialized data, unless it has already been taken for wire export.
    #[inline]
    pub fn array(&self) -> SerializationResult<&ArrayRef> {
        self.array
            .as_ref()
            .ok_or_else(|| SerializationError::NullArray {
                descriptor: self.descriptor.to_string(),
            })
    }

    /// Produces the transport-ready structure for this batch, consuming its
    /// array.
    ///
    /// A batch can be exported at most once: a second call fails with
    /// [`SerializationError::NullArray`].
    pub fn to_wire(&mut self) -> SerializationResult<WireBatch> {
        let array = self
            .array
            .take()
            .ok_or_else(|| SerializationError::NullArray {
                descriptor: self.descriptor.to_string(),
            })?;

        Ok(WireBatch {
            component_type: self.component_type,
            array,
        })
    }

    /// Repackages this batch as a multi-row column, one run of `lengths[i]`
    /// consecutive instances per row.
    #[inline]
    pub fn partitioned(
        self,
        lengths: impl IntoIterator<Item = usize>,
    ) -> SerializationResult<ComponentColumn> {
        ComponentColumn::from_batch_with_lengths(self, &lengths.into_iter().collect::<Vec<_>>())
    }

    /// Repackages this batch as a multi-row column with exactly one instance
    /// per row.
    #[inline]
    pub fn partitioned_unit(self) -> SerializationResult<ComponentColumn> {
        let num_rows = self.len();
        self.partitioned(std::iter::repeat_n(1, num_rows))
    }
}

// ---
