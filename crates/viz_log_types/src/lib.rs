//! The basic building blocks of the log messages that flow from the SDK to a
//! sink: entity paths, timelines, and the wire-level message envelope.

mod path;
mod time;

pub use self::{
    path::{EntityPath, EntityPathPart, PathParseError},
    time::{SortingStatus, TimeColumn, TimeType, Timeline},
};

use viz_types_core::{WireBatch, WireColumn};

// ---

/// Everything the SDK can send down a sink.
#[derive(Clone, Debug)]
pub enum LogMsg {
    /// A single point in time for one entity: the output of one log call.
    Row(RowMsg),

    /// Many points in time for one entity, submitted in one go.
    Columns(ColumnsMsg),
}

impl LogMsg {
    #[inline]
    pub fn entity_path(&self) -> &EntityPath {
        match self {
            Self::Row(msg) => &msg.entity_path,
            Self::Columns(msg) => &msg.entity_path,
        }
    }
}

/// The component batches of one entity at one point in time.
#[derive(Clone, Debug)]
pub struct RowMsg {
    pub entity_path: EntityPath,

    /// Static data lives outside of all timelines and never expires.
    pub is_static: bool,

    /// One wire batch per logged component, in the order they were produced.
    ///
    /// A zero-length batch is meaningful: it clears the component.
    pub batches: Vec<WireBatch>,
}

/// Multi-row, columnar data for one entity: one run of component instances
/// per time value.
#[derive(Clone, Debug)]
pub struct ColumnsMsg {
    pub entity_path: EntityPath,

    /// The time value of each row, per timeline. All the same length.
    pub time_columns: Vec<TimeColumn>,

    /// The partitioned component data. Each column has exactly as many rows
    /// as each of the time columns.
    pub columns: Vec<WireColumn>,
}
