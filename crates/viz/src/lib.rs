//! The viz logging SDK, all in one place.
//!
//! Log multimodal data as component batches and send it to a sink:
//!
//! ```no_run
//! let rec = viz::RecordingStreamBuilder::new("my_app").buffered()?;
//!
//! rec.log(
//!     "world/points",
//!     &viz::archetypes::Points3D::new([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)])
//!         .with_radii([0.5_f32, 0.5]),
//! );
//! # Ok::<(), viz::RecordingStreamError>(())
//! ```

pub use viz_sdk::{
    BufferedSink, ColumnsMsg, EntityPath, EntityPathPart, LogMsg, LogSink, MemorySink,
    MemorySinkStorage, PathParseError, RecordingStream, RecordingStreamBuilder,
    RecordingStreamError, RecordingStreamResult, RegisteredComponentType, RowMsg, SortingStatus,
    TimeColumn, TimeType, Timeline, decide_logging_enabled,
};

pub use viz_types_core::{
    Archetype, ArchetypeFieldName, ArchetypeName, AsComponents, Collection, Component,
    ComponentBatch, ComponentColumn, ComponentDescriptor, ComponentName, ComponentTypeHandle,
    ComponentTypeRegistrar, ComponentTypeRegistry, DeserializationError, DeserializationResult,
    GenericIndicatorComponent, Loggable, SerializationContext, SerializationError,
    SerializationResult, archetypes, components, datatypes,
};

/// Everything you need to get started logging.
pub mod prelude {
    pub use crate::{
        AsComponents, Collection, Component, EntityPath, Loggable, RecordingStream,
        RecordingStreamBuilder, TimeColumn, Timeline,
    };

    pub use crate::archetypes::{Points3D, TextLog};
    pub use crate::components::{Color, Position3D, Radius, Scalar, Text};
}

/// Re-exports of external crates that show up in our public API.
pub mod external {
    pub use viz_log_types;
    pub use viz_sdk;
    pub use viz_types_core;

    pub use viz_types_core::external::arrow;
}
