use std::borrow::Cow;

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::DataType;

use crate::{Component, ComponentDescriptor, DeserializationError, DeserializationResult,
            Loggable, SerializationResult};

/// A string of text, e.g. for labels and log messages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Text(pub String);

impl Text {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Text {
    #[inline]
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Text {
    #[inline]
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

crate::impl_into_cow!(Text);

impl Loggable for Text {
    #[inline]
    fn arrow_datatype() -> DataType {
        DataType::Utf8
    }

    fn to_arrow<'a>(
        data: impl IntoIterator<Item = impl Into<Cow<'a, Self>>>,
    ) -> SerializationResult<ArrayRef> {
        let values: Vec<String> = data
            .into_iter()
            .map(|text| text.into().into_owned().0)
            .collect();
        Ok(std::sync::Arc::new(StringArray::from(values)))
    }

    fn from_arrow(data: &dyn Array) -> DeserializationResult<Vec<Self>> {
        let array = data
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| {
                DeserializationError::datatype_mismatch(&Self::arrow_datatype(), data.data_type())
            })?;
        (0..array.len())
            .map(|index| {
                if array.is_null(index) {
                    Err(DeserializationError::missing_data(index))
                } else {
                    Ok(Self(array.value(index).to_owned()))
                }
            })
            .collect()
    }
}

impl Component for Text {
    #[inline]
    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Text")
    }
}
