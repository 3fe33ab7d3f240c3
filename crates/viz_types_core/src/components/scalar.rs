use std::borrow::Cow;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::datatypes::DataType;

use crate::{Component, ComponentDescriptor, DeserializationError, DeserializationResult,
            Loggable, SerializationResult};

/// A double-precision scalar, e.g. a single data point on a plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scalar(pub f64);

impl From<f64> for Scalar {
    #[inline]
    fn from(value: f64) -> Self {
        Self(value)
    }
}

crate::impl_into_cow!(Scalar);

impl Loggable for Scalar {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Float64
    }

    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        let values: Vec<f64> = data.into_iter().map(|scalar| scalar.into().0).collect();
        Ok(std::sync::Arc::new(Float64Array::from(values)))
    }

    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let array = data
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| {
                DeserializationError::datatype_mismatch(&Self::arrow_datatype(), data.data_type())
            })?;
        Ok(array.values().iter().copied().map(Self).collect())
    }
}

impl Component for Scalar {
    #[inline]
    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Scalar")
    }
}
