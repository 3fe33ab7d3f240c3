use arrow::array::{Array as _, ArrayRef, ListArray};

use crate::ComponentTypeHandle;

/// The transport-ready form of a [`crate::ComponentBatch`]: the serialized
/// array plus the handle of its registered component type.
///
/// This is what actually crosses the boundary to the sink.
#[derive(Debug, Clone)]
pub struct WireBatch {
    pub component_type: ComponentTypeHandle,
    pub array: ArrayRef,
}

impl WireBatch {
    /// Number of component instances in the batch.
    #[inline]
    pub fn num_instances(&self) -> usize {
        self.array.len()
    }
}

/// The transport-ready form of a [`crate::ComponentColumn`]: the nested list
/// array plus the handle of its registered component type.
#[derive(Debug, Clone)]
pub struct WireColumn {
    pub component_type: ComponentTypeHandle,
    pub list_array: ListArray,
}

impl WireColumn {
    /// Number of rows in the column.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.list_array.len()
    }
}
