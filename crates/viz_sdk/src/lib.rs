//! The viz logging SDK: serialize component data and send it to a sink.
//!
//! The typical entry point is [`RecordingStreamBuilder`]:
//!
//! ```no_run
//! # use viz_sdk::RecordingStreamBuilder;
//! let rec = RecordingStreamBuilder::new("my_app").buffered()?;
//! # Ok::<(), viz_sdk::RecordingStreamError>(())
//! ```

mod log_sink;
mod recording_stream;

pub use self::{
    log_sink::{BufferedSink, LogSink, MemorySink, MemorySinkStorage, RegisteredComponentType},
    recording_stream::{
        RecordingStream, RecordingStreamBuilder, RecordingStreamError, RecordingStreamResult,
    },
};

pub use viz_log_types::{
    ColumnsMsg, EntityPath, EntityPathPart, LogMsg, PathParseError, RowMsg, SortingStatus,
    TimeColumn, TimeType, Timeline,
};
pub use viz_types_core::{
    Archetype, AsComponents, Collection, Component, ComponentBatch, ComponentColumn,
    ComponentDescriptor, ComponentTypeHandle, ComponentTypeRegistrar, ComponentTypeRegistry,
    Loggable, SerializationContext, SerializationError, SerializationResult,
};

// ---

/// The environment variable that overrides whether logging is enabled.
const ENV_VAR: &str = "VIZ";

/// Checks the `VIZ` environment variable, defaulting to `default_enabled` if
/// it is unset or unparsable.
pub fn decide_logging_enabled(default_enabled: bool) -> bool {
    match std::env::var(ENV_VAR) {
        Ok(value) => match value.to_lowercase().as_str() {
            "0" | "false" | "off" => false,
            "1" | "true" | "on" => true,
            _ => {
                log::warn!(
                    "Invalid value for environment variable {ENV_VAR}={value:?}. Expected 'on' or 'off'. It will be ignored"
                );
                default_enabled
            }
        },
        Err(_) => default_enabled,
    }
}
