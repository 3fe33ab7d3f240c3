use std::borrow::Cow;

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::datatypes::DataType;

use crate::{Component, ComponentDescriptor, DeserializationError, DeserializationResult,
            Loggable, SerializationResult};

/// An RGBA color, packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_unmultiplied_rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn from_unmultiplied_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        ]
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(rgba: u32) -> Self {
        Self(rgba)
    }
}

crate::impl_into_cow!(Color);

impl Loggable for Color {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::UInt32
    }

    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        let values: Vec<u32> = data.into_iter().map(|color| color.into().0).collect();
        Ok(std::sync::Arc::new(UInt32Array::from(values)))
    }

    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let array = data
            .as_any()
            .downcast_ref::<UInt32Array>()
            .ok_or_else(|| {
                DeserializationError::datatype_mismatch(&Self::arrow_datatype(), data.data_type())
            })?;
        Ok(array.values().iter().copied().map(Self).collect())
    }
}

impl Component for Color {
    #[inline]
    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Color")
    }
}
