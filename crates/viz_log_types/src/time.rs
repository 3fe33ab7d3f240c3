use arrow::array::Int64Array;

use viz_types_core::{SerializationError, SerializationResult};

// ---

/// How the 64-bit values of a [`Timeline`] are to be interpreted.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum TimeType {
    /// A frame number or other monotonically increasing integer.
    Sequence,

    /// Elapsed time, in nanoseconds.
    DurationNs,

    /// Nanoseconds since the Unix epoch.
    TimestampNs,
}

impl TimeType {
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::Sequence => 0,
            Self::DurationNs => 1,
            Self::TimestampNs => 2,
        }
    }

    /// The inverse of [`Self::to_u8`]; out-of-range discriminants are an
    /// error, never silently coerced.
    pub fn from_u8(value: u8) -> SerializationResult<Self> {
        match value {
            0 => Ok(Self::Sequence),
            1 => Ok(Self::DurationNs),
            2 => Ok(Self::TimestampNs),
            _ => Err(SerializationError::InvalidEnumValue {
                enum_name: "TimeType",
                value: value as u64,
            }),
        }
    }
}

impl std::fmt::Display for TimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequence => f.write_str("sequence"),
            Self::DurationNs => f.write_str("duration"),
            Self::TimestampNs => f.write_str("timestamp"),
        }
    }
}

// ---

/// Whether the values of a time column are known to be sorted.
///
/// Receivers can skip a sort when this says [`Self::Sorted`]; [`Self::Unknown`]
/// is always safe to send.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum SortingStatus {
    #[default]
    Unknown = 0,
    Sorted = 1,
    Unsorted = 2,
}

impl SortingStatus {
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// The inverse of [`Self::to_u8`]; out-of-range discriminants are an
    /// error, never silently coerced.
    pub fn from_u8(value: u8) -> SerializationResult<Self> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Sorted),
            2 => Ok(Self::Unsorted),
            _ => Err(SerializationError::InvalidEnumValue {
                enum_name: "SortingStatus",
                value: value as u64,
            }),
        }
    }
}

// ---

/// A time axis, identified by its name and the interpretation of its values.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Timeline {
    name: String,
    typ: TimeType,
}

impl Timeline {
    #[inline]
    pub fn new(name: impl Into<String>, typ: TimeType) -> Self {
        Self {
            name: name.into(),
            typ,
        }
    }

    /// A timeline of frame numbers or similar.
    #[inline]
    pub fn new_sequence(name: impl Into<String>) -> Self {
        Self::new(name, TimeType::Sequence)
    }

    /// A timeline of elapsed nanoseconds.
    #[inline]
    pub fn new_duration(name: impl Into<String>) -> Self {
        Self::new(name, TimeType::DurationNs)
    }

    /// A timeline of nanoseconds since the Unix epoch.
    #[inline]
    pub fn new_timestamp(name: impl Into<String>) -> Self {
        Self::new(name, TimeType::TimestampNs)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn typ(&self) -> TimeType {
        self.typ
    }
}

// ---

/// A column of time values for one [`Timeline`], one value per row.
#[derive(Clone, Debug)]
pub struct TimeColumn {
    timeline: Timeline,
    times: Vec<i64>,
    sorting_status: SortingStatus,
}

impl TimeColumn {
    /// Computes the sorting status on construction, so receivers never have
    /// to guess.
    pub fn new(timeline: Timeline, times: impl Into<Vec<i64>>) -> Self {
        let times = times.into();
        let sorting_status = if times.is_sorted() {
            SortingStatus::Sorted
        } else {
            SortingStatus::Unsorted
        };
        Self {
            timeline,
            times,
            sorting_status,
        }
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn times(&self) -> &[i64] {
        &self.times
    }

    #[inline]
    pub fn sorting_status(&self) -> SortingStatus {
        self.sorting_status
    }

    /// The values as an arrow array, ready for transport.
    #[inline]
    pub fn times_array(&self) -> Int64Array {
        Int64Array::from(self.times.clone())
    }
}

// ---
