use std::sync::Arc;

use arrow::datatypes::DataType;
use parking_lot::Mutex;

use viz_log_types::LogMsg;
use viz_types_core::{
    ComponentDescriptor, ComponentTypeHandle, ComponentTypeRegistrar, RegistrationError,
};

// ---

/// Where the SDK sends its log messages.
///
/// A sink is also the transport-side registration boundary for component
/// types: handles it gives out are only meaningful to this sink.
pub trait LogSink: ComponentTypeRegistrar + Send + Sync {
    /// Send this log message.
    fn send(&self, msg: LogMsg);

    /// Blocks until all pending data has been sent.
    fn flush_blocking(&self);
}

// ---

/// A component type as a sink saw it being registered.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredComponentType {
    pub descriptor: ComponentDescriptor,
    pub datatype: DataType,
    pub handle: ComponentTypeHandle,
}

#[derive(Default)]
struct SinkState {
    msgs: Vec<LogMsg>,
    registered: Vec<RegisteredComponentType>,
}

impl SinkState {
    fn register(
        &mut self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> ComponentTypeHandle {
        let handle = ComponentTypeHandle(self.registered.len() as u32);
        self.registered.push(RegisteredComponentType {
            descriptor: descriptor.clone(),
            datatype: datatype.clone(),
            handle,
        });
        handle
    }
}

// ---

/// Store log messages in memory until you call [`LogSink::drain_backlog`].
#[derive(Default)]
pub struct BufferedSink(Mutex<SinkState>);

impl BufferedSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all buffered messages.
    pub fn drain_backlog(&self) -> Vec<LogMsg> {
        std::mem::take(&mut self.0.lock().msgs)
    }
}

impl ComponentTypeRegistrar for BufferedSink {
    fn register_component_type(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> Result<ComponentTypeHandle, RegistrationError> {
        Ok(self.0.lock().register(descriptor, datatype))
    }
}

impl LogSink for BufferedSink {
    fn send(&self, msg: LogMsg) {
        self.0.lock().msgs.push(msg);
    }

    fn flush_blocking(&self) {}
}

// ---

/// Store log messages directly in memory.
///
/// Although very similar to `BufferedSink` this sink is a real endpoint and
/// never drained by a transport; it is used for tests and for batch export.
#[derive(Default)]
pub struct MemorySink(MemorySinkStorage);

impl MemorySink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the shared storage behind this sink.
    #[inline]
    pub fn buffer(&self) -> MemorySinkStorage {
        self.0.clone()
    }
}

impl ComponentTypeRegistrar for MemorySink {
    fn register_component_type(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> Result<ComponentTypeHandle, RegistrationError> {
        Ok(self.0.state.lock().register(descriptor, datatype))
    }
}

impl LogSink for MemorySink {
    fn send(&self, msg: LogMsg) {
        self.0.state.lock().msgs.push(msg);
    }

    fn flush_blocking(&self) {}
}

/// The storage used by [`MemorySink`]; cheap to clone, shared with the sink.
#[derive(Clone, Default)]
pub struct MemorySinkStorage {
    state: Arc<Mutex<SinkState>>,
}

impl MemorySinkStorage {
    /// Removes and returns all stored messages.
    pub fn take(&self) -> Vec<LogMsg> {
        std::mem::take(&mut self.state.lock().msgs)
    }

    /// Number of messages stored so far.
    #[inline]
    pub fn num_msgs(&self) -> usize {
        self.state.lock().msgs.len()
    }

    /// The component types registered through this sink, in registration
    /// order.
    pub fn registered_types(&self) -> Vec<RegisteredComponentType> {
        self.state.lock().registered.clone()
    }
}

// ---

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;
    use viz_log_types::{EntityPath, RowMsg};

    use super::*;

    #[test]
    fn handles_are_sequential_per_sink() {
        let sink = MemorySink::new();

        let a = sink
            .register_component_type(
                &ComponentDescriptor::new("viz.components.Radius"),
                &DataType::Float32,
            )
            .unwrap();
        let b = sink
            .register_component_type(
                &ComponentDescriptor::new("viz.components.Color"),
                &DataType::UInt32,
            )
            .unwrap();

        assert_eq!(a, ComponentTypeHandle(0));
        assert_eq!(b, ComponentTypeHandle(1));
        assert_eq!(sink.buffer().registered_types().len(), 2);
    }

    #[test]
    fn buffered_sink_drains() {
        let sink = BufferedSink::new();
        sink.send(LogMsg::Row(RowMsg {
            entity_path: EntityPath::from("world"),
            is_static: false,
            batches: Vec::new(),
        }));

        assert_eq!(sink.drain_backlog().len(), 1);
        assert!(sink.drain_backlog().is_empty());
    }
}
