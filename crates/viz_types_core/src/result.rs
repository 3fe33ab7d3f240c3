use std::sync::Arc;

// ---

pub type SerializationResult<T> = ::std::result::Result<T, SerializationError>;

/// Things that can go wrong when turning user data into wire-ready columnar batches.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SerializationError {
    /// The transport refused or failed to register a component type.
    ///
    /// Registration failures are never cached: a later attempt with the same
    /// descriptor will retry the registration call.
    #[error("failed to register component type {descriptor:?}: {reason}")]
    Registration { descriptor: String, reason: String },

    /// The underlying arrow encoder rejected the data.
    #[error("arrow serialization failed: {0}")]
    Encoding(Arc<arrow::error::ArrowError>),

    /// An operation was asked to export or consume a batch whose array was
    /// unset or already taken.
    #[error("the arrow array of {descriptor:?} was unset or already taken")]
    NullArray { descriptor: String },

    /// Lengths/offsets inconsistent with the batch length, or malformed.
    #[error("invalid partition of a batch of {batch_len} instances: {reason}")]
    InvalidPartition { batch_len: usize, reason: String },

    /// No encoder/descriptor can be resolved for the given value, or its
    /// attribution is ambiguous.
    #[error("cannot serialize {actual:?}: {reason}")]
    UnsupportedType { actual: String, reason: String },

    /// An out-of-range discriminant crossed a boundary.
    #[error("{value} is not a valid {enum_name}")]
    InvalidEnumValue { enum_name: &'static str, value: u64 },
}

impl From<arrow::error::ArrowError> for SerializationError {
    #[inline]
    fn from(err: arrow::error::ArrowError) -> Self {
        Self::Encoding(Arc::new(err))
    }
}

impl SerializationError {
    #[inline]
    pub fn invalid_partition(batch_len: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPartition {
            batch_len,
            reason: reason.into(),
        }
    }
}

// ---

pub type DeserializationResult<T> = ::std::result::Result<T, DeserializationError>;

/// Things that can go wrong when reading instances back out of an arrow array.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DeserializationError {
    #[error("expected arrow datatype {expected:?}, got {got:?}")]
    DatatypeMismatch { expected: String, got: String },

    #[error("missing data at index {index}")]
    MissingData { index: usize },
}

impl DeserializationError {
    #[inline]
    pub fn datatype_mismatch(
        expected: &arrow::datatypes::DataType,
        got: &arrow::datatypes::DataType,
    ) -> Self {
        Self::DatatypeMismatch {
            expected: format!("{expected:?}"),
            got: format!("{got:?}"),
        }
    }

    #[inline]
    pub fn missing_data(index: usize) -> Self {
        Self::MissingData { index }
    }
}
