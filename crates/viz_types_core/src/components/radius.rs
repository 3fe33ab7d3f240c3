use std::borrow::Cow;

use arrow::array::{Array, ArrayRef, Float32Array};
use arrow::datatypes::DataType;

use crate::{Component, ComponentDescriptor, DeserializationError, DeserializationResult,
            Loggable, SerializationResult};

/// The radius of something, in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Radius(pub f32);

impl From<f32> for Radius {
    #[inline]
    fn from(radius: f32) -> Self {
        Self(radius)
    }
}

crate::impl_into_cow!(Radius);

impl Loggable for Radius {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Float32
    }

    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        let values: Vec<f32> = data.into_iter().map(|radius| radius.into().0).collect();
        Ok(std::sync::Arc::new(Float32Array::from(values)))
    }

    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let array = data
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| {
                DeserializationError::datatype_mismatch(&Self::arrow_datatype(), data.data_type())
            })?;
        Ok(array.values().iter().copied().map(Self).collect())
    }
}

impl Component for Radius {
    #[inline]
    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Radius")
    }
}
