//! Helpers for testing code that needs a component-type registrar without a
//! real transport behind it.

use arrow::datatypes::DataType;
use parking_lot::Mutex;

use crate::{ComponentDescriptor, ComponentTypeHandle, ComponentTypeRegistrar, RegistrationError};

/// A registrar that hands out sequential handles and remembers everything it
/// registered, in order.
#[derive(Default)]
pub struct SequentialRegistrar {
    registered: Mutex<Vec<(ComponentDescriptor, DataType)>>,
}

impl SequentialRegistrar {
    /// Everything registered so far, in registration order.
    pub fn registered(&self) -> Vec<(ComponentDescriptor, DataType)> {
        self.registered.lock().clone()
    }

    pub fn num_registered(&self) -> usize {
        self.registered.lock().len()
    }
}

impl ComponentTypeRegistrar for SequentialRegistrar {
    fn register_component_type(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> Result<ComponentTypeHandle, RegistrationError> {
        let mut registered = self.registered.lock();
        let handle = ComponentTypeHandle(registered.len() as u32);
        registered.push((descriptor.clone(), datatype.clone()));
        Ok(handle)
    }
}
