use std::sync::Arc;

use arrow::array::{Array as _, ListArray};
use arrow::buffer::{OffsetBuffer, ScalarBuffer};
use arrow::datatypes::Field;
use itertools::Itertools as _;

use crate::{
    ComponentBatch, ComponentDescriptor, ComponentTypeHandle, SerializationError,
    SerializationResult, WireColumn,
};

// ---

/// A [`ComponentBatch`] repackaged as a nested list array, one sub-run of
/// instances per row, for multi-row (time-series) submission.
///
/// A run of length zero represents "no value at that row". This is preserved
/// through serialization: it is distinct from a run of length one that happens
/// to contain a default value.
#[derive(Debug, Clone)]
pub struct ComponentColumn {
    list_array: ListArray,
    descriptor: ComponentDescriptor,
    component_type: ComponentTypeHandle,
}

impl ComponentColumn {
    /// Partitions `batch` into one row per entry of `lengths`, where row `i`
    /// contains `lengths[i]` consecutive instances.
    ///
    /// The lengths must sum up to exactly the batch's length, otherwise this
    /// fails with [`SerializationError::InvalidPartition`].
    pub fn from_batch_with_lengths(
        batch: ComponentBatch,
        lengths: &[usize],
    ) -> SerializationResult<Self> {
        let total: usize = lengths.iter().sum();
        if total != batch.len() {
            return Err(SerializationError::invalid_partition(
                batch.len(),
                format!("lengths sum up to {total}"),
            ));
        }

        // Lengths are just the derivative of offsets.
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        let mut acc = 0;
        offsets.push(acc);
        for &len in lengths {
            acc += len;
            offsets.push(acc);
        }

        Self::from_batch_with_offsets(batch, &offsets)
    }

    /// Partitions `batch` using explicit offsets: row `i` covers the instances
    /// in `offsets[i]..offsets[i+1]`.
    ///
    /// Offsets must be non-decreasing, start at zero and end at the batch's
    /// length, otherwise this fails with [`SerializationError::InvalidPartition`].
    pub fn from_batch_with_offsets(
        mut batch: ComponentBatch,
        offsets: &[usize],
    ) -> SerializationResult<Self> {
        let batch_len = batch.len();

        let invalid = |reason: String| SerializationError::invalid_partition(batch_len, reason);

        if offsets.is_empty() {
            return Err(invalid("offsets cannot be empty".to_owned()));
        }
        if offsets[0] != 0 {
            return Err(invalid(format!("offsets start at {}", offsets[0])));
        }
        if let Some((a, b)) = offsets.iter().tuple_windows().find(|(a, b)| a > b) {
            return Err(invalid(format!("offsets are not monotonic ({a} > {b})")));
        }
        if *offsets.last().unwrap_or(&0) != batch_len {
            return Err(invalid(format!(
                "offsets end at {}",
                offsets.last().unwrap_or(&0)
            )));
        }

        let offsets: Vec<i32> = offsets
            .iter()
            .map(|&offset| {
                i32::try_from(offset)
                    .map_err(|_| invalid(format!("offset {offset} overflows i32")))
            })
            .collect::<SerializationResult<_>>()?;

        let descriptor = batch.descriptor().clone();

        // Partitioning consumes the batch's array, just like a wire export.
        let wire = batch.to_wire()?;

        let field = Arc::new(Field::new_list_field(wire.array.data_type().clone(), true));
        let offsets = OffsetBuffer::new(ScalarBuffer::from(offsets));

        let list_array = ListArray::try_new(field, offsets, wire.array, None)?;

        Ok(Self {
            list_array,
            descriptor,
            component_type: wire.component_type,
        })
    }

    /// Number of rows in the column. Zero rows is legal.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.list_array.len()
    }

    /// Number of instances in row `index`; zero means "no value at that row".
    #[inline]
    pub fn row_len(&self, index: usize) -> usize {
        self.list_array.value_length(index) as usize
    }

    #[inline]
    pub fn list_array(&self) -> &ListArray {
        &self.list_array
    }

    #[inline]
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn component_type(&self) -> ComponentTypeHandle {
        self.component_type
    }

    /// Produces the transport-ready structure for this column.
    #[inline]
    pub fn into_wire(self) -> WireColumn {
        WireColumn {
            component_type: self.component_type,
            list_array: self.list_array,
        }
    }
}

// ---
