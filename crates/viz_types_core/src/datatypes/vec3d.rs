use std::sync::Arc;

use arrow::array::{Array, ArrayRef, FixedSizeListArray, Float32Array};
use arrow::datatypes::{DataType, Field};

use crate::{DeserializationError, DeserializationResult, Loggable, SerializationResult};

/// A vector in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3D(pub [f32; 3]);

impl Vec3D {
    pub const ZERO: Self = Self([0.0; 3]);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

impl From<[f32; 3]> for Vec3D {
    #[inline]
    fn from(xyz: [f32; 3]) -> Self {
        Self(xyz)
    }
}

impl From<(f32, f32, f32)> for Vec3D {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

crate::impl_into_cow!(Vec3D);

impl Loggable for Vec3D {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, false)), 3)
    }

    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<std::borrow::Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        let mut coords: Vec<f32> = Vec::new();
        for value in data {
            coords.extend_from_slice(&value.into().0);
        }

        let values = Arc::new(Float32Array::from(coords));
        let field = Arc::new(Field::new("item", DataType::Float32, false));
        Ok(Arc::new(FixedSizeListArray::try_new(
            field, 3, values, None,
        )?))
    }

    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let expected = Self::arrow_datatype();
        let list = data
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .filter(|list| list.value_length() == 3)
            .ok_or_else(|| DeserializationError::datatype_mismatch(&expected, data.data_type()))?;

        (0..list.len())
            .map(|index| {
                let row = list.value(index);
                let coords = row
                    .as_any()
                    .downcast_ref::<Float32Array>()
                    .ok_or_else(|| {
                        DeserializationError::datatype_mismatch(&expected, data.data_type())
                    })?;
                Ok(Self([coords.value(0), coords.value(1), coords.value(2)]))
            })
            .collect()
    }
}
