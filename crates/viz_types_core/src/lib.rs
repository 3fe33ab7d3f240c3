//! The core types and traits that power viz's data model.
//!
//! viz (and the underlying Arrow data framework) is designed to work with
//! large arrays of [`Component`]s, as opposed to single instances.
//! When multiple instances of a [`Component`] are put together in an array,
//! they yield a [`ComponentBatch`]: the atomic unit of serialization.
//!
//! User data enters through a [`Collection`] (borrowed or owned), is encoded
//! through [`Loggable`], tagged with its registered component type, and leaves
//! as a [`ComponentBatch`], or, for multi-row time-series submissions, as a
//! partitioned [`ComponentColumn`].

// ---

/// Describes the interface for interpreting an object as a bundle of
/// [`ComponentBatch`]es.
///
/// While it is implemented for all builtin archetypes and components, it is
/// also the main mechanism for writing fully custom bundles: implement it for
/// your own type and it becomes loggable.
pub trait AsComponents {
    /// Exposes the object's contents as an ordered list of serialized
    /// [`ComponentBatch`]es.
    ///
    /// For archetypes this preserves the declared field order, skips optional
    /// fields that are absent (no batch at all, as opposed to an empty batch,
    /// which signals a clear), and appends exactly one indicator batch, last.
    ///
    /// Fail-fast: the first error encountered aborts the whole call. Callers
    /// never see partial output.
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>>;
}

#[expect(dead_code)]
fn assert_as_components_object_safe() {
    let _: &dyn AsComponents;
}

impl<C: Component> AsComponents for C {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        let collection = Collection::from_elements(Some(self.clone()));
        Ok(vec![ComponentBatch::from_collection(&collection, ctx)?])
    }
}

impl<C: Component> AsComponents for Option<C> {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        match self {
            Some(component) => component.as_component_batches(ctx),
            None => Ok(Vec::new()),
        }
    }
}

impl<C: Component> AsComponents for Collection<'_, C> {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        Ok(vec![ComponentBatch::from_collection(self, ctx)?])
    }
}

impl<C: Component> AsComponents for Vec<C> {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        Collection::borrowed(self.as_slice()).as_component_batches(ctx)
    }
}

impl<C: Component> AsComponents for [C] {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        Collection::borrowed(self).as_component_batches(ctx)
    }
}

impl<C: Component, const N: usize> AsComponents for [C; N] {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        Collection::borrowed(self.as_slice()).as_component_batches(ctx)
    }
}

impl<const N: usize> AsComponents for [&dyn AsComponents; N] {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        self.as_slice().as_component_batches(ctx)
    }
}

impl AsComponents for &[&dyn AsComponents] {
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        let mut batches = Vec::new();
        for as_components in self.iter() {
            // The `?` is the fail-fast: one bad argument aborts the whole call.
            batches.extend(as_components.as_component_batches(ctx)?);
        }
        Ok(batches)
    }
}

impl AsComponents for Vec<&dyn AsComponents> {
    #[inline]
    fn as_component_batches(
        &self,
        ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        self.as_slice().as_component_batches(ctx)
    }
}

// ---

mod archetype;
mod collection;
mod component_batch;
mod component_column;
mod component_descriptor;
mod component_type;
mod loggable;
mod result;
mod wire;

pub mod testing;

#[path = "macros.rs"]
mod _macros; // just for the side-effect of exporting the macros

pub(crate) mod macros {
    pub(crate) use super::_macros::declare_name_type;
}

pub use self::{
    archetype::{Archetype, ArchetypeFieldName, ArchetypeName, GenericIndicatorComponent},
    collection::{Collection, INLINE_CAPACITY},
    component_batch::{ComponentBatch, SerializationContext},
    component_column::ComponentColumn,
    component_descriptor::ComponentDescriptor,
    component_type::{
        ComponentTypeHandle, ComponentTypeRegistrar, ComponentTypeRegistry, RegistrationError,
    },
    loggable::{Component, ComponentName, Loggable},
    result::{
        DeserializationError, DeserializationResult, SerializationError, SerializationResult,
    },
    wire::{WireBatch, WireColumn},
};

/// Fundamental archetypes that are implemented in `viz_types_core` directly.
pub mod archetypes;

/// Fundamental [`Component`]s that are implemented in `viz_types_core` directly.
pub mod components;

/// Fundamental datatypes that are implemented in `viz_types_core` directly.
pub mod datatypes;

pub mod external {
    pub use arrow;
}
