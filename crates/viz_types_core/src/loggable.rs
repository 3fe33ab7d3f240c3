use crate::{ComponentDescriptor, DeserializationResult, SerializationResult};

use crate::macros::declare_name_type;

// ---

/// A [`Loggable`] represents a single instance in an array of loggable data.
///
/// Internally, Arrow, and by extension viz, only deal with arrays of data.
/// We refer to individual entries in these arrays as instances.
///
/// A [`Loggable`] has no semantics (such as a name, for example): it's just data.
/// If you want to encode semantics, then you're looking for a [`Component`], which
/// extends [`Loggable`].
pub trait Loggable: 'static + Send + Sync + Clone + Sized {
    /// The underlying [`arrow::datatypes::DataType`] of a single instance.
    fn arrow_datatype() -> arrow::datatypes::DataType;

    /// Returns an empty arrow array matching this `Loggable`'s underlying datatype.
    #[inline]
    fn arrow_empty() -> arrow::array::ArrayRef {
        arrow::array::new_empty_array(&Self::arrow_datatype())
    }

    /// Given an iterator of owned or reference values to the current [`Loggable`],
    /// serializes them into an arrow array.
    ///
    /// The resulting array owns all of its buffers: no reference into the input
    /// data survives this call.
    ///
    /// Must be deterministic: identical input sequences produce byte-identical
    /// arrays.
    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<std::borrow::Cow<'a, Self>>>,
    ) -> SerializationResult<arrow::array::ArrayRef>
    where
        Self: 'a;

    /// Given an arrow array, deserializes it back into a collection of [`Loggable`]s.
    fn from_arrow(data: &dyn arrow::array::Array) -> DeserializationResult<Vec<Self>>;
}

/// A [`Component`] describes semantic data that can be used by any number of
/// archetypes, or freestanding.
pub trait Component: Loggable {
    /// Returns the complete [`ComponentDescriptor`] for this [`Component`].
    ///
    /// Every component is uniquely identified by its [`ComponentDescriptor`].
    fn descriptor() -> ComponentDescriptor;

    /// The fully-qualified name of this component, e.g. `viz.components.Position3D`.
    ///
    /// This is a trivial but useful helper for `Self::descriptor().component_name`.
    #[inline]
    fn name() -> ComponentName {
        Self::descriptor().component_name
    }
}

// ---

declare_name_type!(
    /// The fully-qualified name of a [`Component`], e.g. `viz.components.Position3D`.
    ComponentName
);

impl ComponentName {
    /// Returns the fully-qualified name, e.g. `viz.components.Position3D`.
    ///
    /// This is the default `Display` implementation for [`ComponentName`].
    #[inline]
    pub fn full_name(&self) -> &str {
        self.as_str()
    }

    /// Returns the unqualified name, e.g. `Position3D`.
    #[inline]
    pub fn short_name(&self) -> &str {
        let full_name = self.as_str();
        if let Some(short_name) = full_name.strip_prefix("viz.components.") {
            short_name
        } else if let Some(short_name) = full_name.strip_prefix("viz.") {
            short_name
        } else {
            full_name
        }
    }

    /// Is this an indicator component for an archetype?
    #[inline]
    pub fn is_indicator_component(&self) -> bool {
        self.ends_with("Indicator")
    }

    /// If this is an indicator component, for which archetype?
    pub fn indicator_component_archetype_short_name(&self) -> Option<String> {
        self.short_name()
            .strip_suffix("Indicator")
            .map(|name| name.to_owned())
    }
}
