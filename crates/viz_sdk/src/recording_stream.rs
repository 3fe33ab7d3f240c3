use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use viz_log_types::{ColumnsMsg, EntityPath, LogMsg, RowMsg, TimeColumn};
use viz_types_core::{
    AsComponents, Collection, Component, ComponentBatch, ComponentColumn, ComponentDescriptor,
    ComponentTypeRegistrar, ComponentTypeRegistry, SerializationContext, SerializationError,
};

use crate::log_sink::{BufferedSink, LogSink, MemorySink, MemorySinkStorage};

// ---

/// Errors that can occur when creating or logging to a [`RecordingStream`].
#[derive(thiserror::Error, Debug)]
pub enum RecordingStreamError {
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// A columnar submission where the number of rows doesn't line up.
    #[error("expected {expected} rows, but {what} has {got}")]
    ColumnLengthMismatch {
        expected: usize,
        got: usize,
        what: String,
    },

    /// A columnar submission without any time column to index it.
    #[error("columnar submissions need at least one time column")]
    NoTimeColumns,
}

pub type RecordingStreamResult<T> = Result<T, RecordingStreamError>;

type ErrorHandler = Box<dyn Fn(RecordingStreamError) + Send + Sync>;

// ---

/// Construct a [`RecordingStream`].
///
/// ```no_run
/// # use viz_sdk::RecordingStreamBuilder;
/// let rec = RecordingStreamBuilder::new("viz_example_app").buffered()?;
/// # Ok::<(), viz_sdk::RecordingStreamError>(())
/// ```
#[derive(Debug)]
pub struct RecordingStreamBuilder {
    application_id: String,
    default_enabled: bool,
    enabled: Option<bool>,
    strict: bool,
}

impl RecordingStreamBuilder {
    /// Create a new builder with the given application id, e.g. `"my_app"`.
    ///
    /// The application id is the persistent identity of your app, used to
    /// group recordings together.
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            default_enabled: true,
            enabled: None,
            strict: false,
        }
    }

    /// Set whether or not logging is enabled by default.
    ///
    /// The default can always be overridden using the `VIZ` environment
    /// variable or [`Self::enabled`].
    #[inline]
    pub fn default_enabled(mut self, default_enabled: bool) -> Self {
        self.default_enabled = default_enabled;
        self
    }

    /// Overrides everything else: the `VIZ` environment variable and
    /// [`Self::default_enabled`].
    #[inline]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// In strict mode, any logging error panics instead of being routed to
    /// the error handler. Meant for tests and development.
    #[inline]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Creates a new [`RecordingStream`] that buffers everything in memory
    /// until a transport drains it.
    pub fn buffered(self) -> RecordingStreamResult<RecordingStream> {
        if self.is_enabled() {
            Ok(RecordingStream::new(
                self.application_id,
                self.strict,
                Box::new(BufferedSink::new()),
            ))
        } else {
            log::debug!("Logging disabled, creating a no-op recording stream");
            Ok(RecordingStream::disabled())
        }
    }

    /// Creates a new [`RecordingStream`] that sends everything to a memory
    /// sink, returning both the stream and a handle to the stored messages.
    pub fn memory(self) -> RecordingStreamResult<(RecordingStream, MemorySinkStorage)> {
        let sink = MemorySink::new();
        let storage = sink.buffer();

        if self.is_enabled() {
            Ok((
                RecordingStream::new(self.application_id, self.strict, Box::new(sink)),
                storage,
            ))
        } else {
            log::debug!("Logging disabled, creating a no-op recording stream");
            Ok((RecordingStream::disabled(), storage))
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
            .unwrap_or_else(|| crate::decide_logging_enabled(self.default_enabled))
    }
}

// ---

struct RecordingStreamInner {
    application_id: String,
    sink: Box<dyn LogSink>,
    registry: ComponentTypeRegistry,
    strict: AtomicBool,
    error_handler: Mutex<Option<ErrorHandler>>,
}

impl RecordingStreamInner {
    /// The serialization context backed by this stream's registry and sink.
    fn ctx(&self) -> SerializationContext<'_> {
        let registrar: &dyn ComponentTypeRegistrar = self.sink.as_ref();
        SerializationContext::new(&self.registry, registrar)
    }
}

/// The main way to log data: a handle to a sink plus the component-type
/// registry shared by everything logged through it.
///
/// Cheap to clone: all clones push to the same sink. A disabled stream
/// carries no state at all and every operation on it is a no-op.
#[derive(Clone)]
pub struct RecordingStream {
    inner: Arc<Option<RecordingStreamInner>>,
}

impl RecordingStream {
    fn new(application_id: String, strict: bool, sink: Box<dyn LogSink>) -> Self {
        Self {
            inner: Arc::new(Some(RecordingStreamInner {
                application_id,
                sink,
                registry: ComponentTypeRegistry::new(),
                strict: AtomicBool::new(strict),
                error_handler: Mutex::new(None),
            })),
        }
    }

    /// Creates a new no-op recording stream that drops all logging messages.
    #[inline]
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(None),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    #[inline]
    pub fn application_id(&self) -> Option<&str> {
        self.inner
            .as_ref()
            .as_ref()
            .map(|inner| inner.application_id.as_str())
    }

    /// In strict mode, any logging error panics instead of being routed to
    /// the error handler.
    pub fn set_strict_mode(&self, strict: bool) {
        if let Some(inner) = self.inner.as_ref() {
            inner.strict.store(strict, Ordering::Relaxed);
        }
    }

    /// Install a handler for errors swallowed by the infallible logging
    /// methods. Without one, such errors go to the `log` crate.
    pub fn set_error_handler(
        &self,
        handler: impl Fn(RecordingStreamError) + Send + Sync + 'static,
    ) {
        if let Some(inner) = self.inner.as_ref() {
            *inner.error_handler.lock() = Some(Box::new(handler));
        }
    }

    fn route_error(&self, err: RecordingStreamError) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };

        if inner.strict.load(Ordering::Relaxed) {
            panic!("logging failed (strict mode): {err}");
        }

        if let Some(handler) = inner.error_handler.lock().as_ref() {
            handler(err);
        } else {
            log::error!("logging failed: {err}");
        }
    }

    /// Blocks until all pending data has reached the sink's endpoint.
    pub fn flush_blocking(&self) {
        if let Some(inner) = self.inner.as_ref() {
            inner.sink.flush_blocking();
        }
    }
}

// Logging.
impl RecordingStream {
    /// Log data to the given entity path.
    ///
    /// Errors are routed to the error handler (see [`Self::set_error_handler`])
    /// so that logging can be sprinkled through an app without `?` at every
    /// call site. Use [`Self::try_log`] to handle them yourself.
    #[inline]
    pub fn log(&self, entity_path: impl Into<EntityPath>, as_components: &impl AsComponents) {
        if let Err(err) = self.try_log(entity_path, as_components) {
            self.route_error(err);
        }
    }

    /// Like [`Self::log`], but the data is static: it lives outside of all
    /// timelines and never expires.
    #[inline]
    pub fn log_static(
        &self,
        entity_path: impl Into<EntityPath>,
        as_components: &impl AsComponents,
    ) {
        if let Err(err) = self.try_log_static(entity_path, as_components) {
            self.route_error(err);
        }
    }

    /// Log data to the given entity path, returning any error.
    #[inline]
    pub fn try_log(
        &self,
        entity_path: impl Into<EntityPath>,
        as_components: &impl AsComponents,
    ) -> RecordingStreamResult<()> {
        self.try_log_with_static(entity_path, false, as_components)
    }

    /// Like [`Self::try_log`], but the data is static.
    #[inline]
    pub fn try_log_static(
        &self,
        entity_path: impl Into<EntityPath>,
        as_components: &impl AsComponents,
    ) -> RecordingStreamResult<()> {
        self.try_log_with_static(entity_path, true, as_components)
    }

    /// The fully general row-oriented logging call.
    ///
    /// Fail-fast: if any component fails to serialize, nothing at all reaches
    /// the sink.
    pub fn try_log_with_static(
        &self,
        entity_path: impl Into<EntityPath>,
        is_static: bool,
        as_components: &impl AsComponents,
    ) -> RecordingStreamResult<()> {
        let Some(inner) = self.inner.as_ref() else {
            return Ok(());
        };

        let mut component_batches = as_components.as_component_batches(&inner.ctx())?;

        let batches = component_batches
            .iter_mut()
            .map(|batch| batch.to_wire())
            .collect::<Result<Vec<_>, _>>()?;

        inner.sink.send(LogMsg::Row(RowMsg {
            entity_path: entity_path.into(),
            is_static,
            batches,
        }));

        Ok(())
    }

    /// Serializes a collection against this stream's registry and sink, e.g.
    /// to partition it into a [`ComponentColumn`] for [`Self::send_columns`].
    ///
    /// Returns `None` if the stream is disabled.
    pub fn try_serialize<C: Component>(
        &self,
        collection: &Collection<'_, C>,
    ) -> RecordingStreamResult<Option<ComponentBatch>> {
        let Some(inner) = self.inner.as_ref() else {
            return Ok(None);
        };
        Ok(Some(ComponentBatch::from_collection(
            collection,
            &inner.ctx(),
        )?))
    }

    /// Like [`Self::try_serialize`], but with an explicit descriptor, e.g. one
    /// tagged with an archetype field.
    pub fn try_serialize_with_descriptor<C: Component>(
        &self,
        collection: &Collection<'_, C>,
        descriptor: ComponentDescriptor,
    ) -> RecordingStreamResult<Option<ComponentBatch>> {
        let Some(inner) = self.inner.as_ref() else {
            return Ok(None);
        };
        Ok(Some(ComponentBatch::from_collection_with_descriptor(
            collection,
            descriptor,
            &inner.ctx(),
        )?))
    }

    /// Submit many points in time for one entity in a single call.
    ///
    /// Every time column and every component column must have the same number
    /// of rows. Errors are routed like in [`Self::log`].
    #[inline]
    pub fn send_columns(
        &self,
        entity_path: impl Into<EntityPath>,
        time_columns: impl IntoIterator<Item = TimeColumn>,
        columns: impl IntoIterator<Item = ComponentColumn>,
    ) {
        if let Err(err) = self.try_send_columns(entity_path, time_columns, columns) {
            self.route_error(err);
        }
    }

    /// Like [`Self::send_columns`], but returning any error.
    pub fn try_send_columns(
        &self,
        entity_path: impl Into<EntityPath>,
        time_columns: impl IntoIterator<Item = TimeColumn>,
        columns: impl IntoIterator<Item = ComponentColumn>,
    ) -> RecordingStreamResult<()> {
        let Some(inner) = self.inner.as_ref() else {
            return Ok(());
        };

        let time_columns: Vec<TimeColumn> = time_columns.into_iter().collect();
        let columns: Vec<ComponentColumn> = columns.into_iter().collect();

        let Some(num_rows) = time_columns.first().map(TimeColumn::num_rows) else {
            return Err(RecordingStreamError::NoTimeColumns);
        };

        for time_column in &time_columns {
            if time_column.num_rows() != num_rows {
                return Err(RecordingStreamError::ColumnLengthMismatch {
                    expected: num_rows,
                    got: time_column.num_rows(),
                    what: format!("time column {:?}", time_column.timeline().name()),
                });
            }
        }

        let mut wire_columns = Vec::with_capacity(columns.len());
        for column in columns {
            if column.num_rows() != num_rows {
                return Err(RecordingStreamError::ColumnLengthMismatch {
                    expected: num_rows,
                    got: column.num_rows(),
                    what: format!("component column {}", column.descriptor()),
                });
            }
            wire_columns.push(column.into_wire());
        }

        inner.sink.send(LogMsg::Columns(ColumnsMsg {
            entity_path: entity_path.into(),
            time_columns,
            columns: wire_columns,
        }));

        Ok(())
    }
}
