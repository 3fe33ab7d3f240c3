use std::borrow::Cow;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;

use crate::datatypes::Vec3D;
use crate::{Component, ComponentDescriptor, DeserializationResult, Loggable,
            SerializationResult};

/// A position in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position3D(pub Vec3D);

impl Position3D {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3D::new(x, y, z))
    }
}

impl<T: Into<Vec3D>> From<T> for Position3D {
    #[inline]
    fn from(xyz: T) -> Self {
        Self(xyz.into())
    }
}

crate::impl_into_cow!(Position3D);

impl Loggable for Position3D {
    #[inline]
    fn arrow_datatype() -> DataType {
        Vec3D::arrow_datatype()
    }

    #[inline]
    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        Vec3D::to_arrow(data.into_iter().map(|value| match value.into() {
            Cow::Borrowed(position) => Cow::Borrowed(&position.0),
            Cow::Owned(position) => Cow::Owned(position.0),
        }))
    }

    #[inline]
    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        Ok(Vec3D::from_arrow(data)?.into_iter().map(Self).collect())
    }
}

impl Component for Position3D {
    #[inline]
    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Position3D")
    }
}
