//! End-to-end tests: from user data all the way down to the sink.

use similar_asserts::assert_eq;

use viz_sdk::{
    Collection, EntityPath, LogMsg, RecordingStreamBuilder, RecordingStreamError,
    SerializationError, TimeColumn, Timeline,
};
use viz_types_core::archetypes::Points3D;
use viz_types_core::components::{Position3D, Radius};
use viz_types_core::{
    AsComponents, ComponentBatch, SerializationContext, SerializationResult,
};

// ---

#[test]
fn archetype_reaches_the_sink() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    let points = Points3D::new([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)])
        .with_radii([0.1_f32, 0.2, 0.3]);
    rec.log("world/points", &points);

    let msgs = storage.take();
    assert_eq!(msgs.len(), 1);

    let LogMsg::Row(row) = &msgs[0] else {
        panic!("expected a row message");
    };
    assert_eq!(row.entity_path, EntityPath::from("world/points"));
    assert!(!row.is_static);

    // positions, radii, indicator.
    assert_eq!(row.batches.len(), 3);
    assert!(row.batches.iter().all(|batch| batch.num_instances() == 3));
}

#[test]
fn component_types_register_once_per_stream() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    rec.log("a", &Points3D::new([(0.0, 0.0, 0.0)]));
    let registered_after_first = storage.registered_types().len();
    assert!(registered_after_first > 0);

    rec.log("b", &Points3D::new([(1.0, 1.0, 1.0)]));
    rec.log("c", &Points3D::new([(2.0, 2.0, 2.0)]));

    // Same descriptors, same handles: no re-registration.
    assert_eq!(storage.registered_types().len(), registered_after_first);
    assert_eq!(storage.num_msgs(), 3);
}

#[test]
fn static_data_is_flagged() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    rec.log_static("world/points", &Points3D::new([(0.0, 0.0, 0.0)]));

    let msgs = storage.take();
    let LogMsg::Row(row) = &msgs[0] else {
        panic!("expected a row message");
    };
    assert!(row.is_static);
}

#[test]
fn empty_batch_is_forwarded_as_a_clear() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    rec.log(
        "world/points",
        &Points3D::new([(0.0, 0.0, 0.0)]).with_radii(Vec::<Radius>::new()),
    );

    let msgs = storage.take();
    let LogMsg::Row(row) = &msgs[0] else {
        panic!("expected a row message");
    };

    // positions, the zero-length radii batch, indicator: the empty batch is
    // not dropped on the way to the sink.
    assert_eq!(row.batches.len(), 3);
    assert_eq!(row.batches[1].num_instances(), 0);
}

#[test]
fn absent_field_forwards_nothing() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    rec.log(
        "world/points",
        &Points3D::new([(0.0, 0.0, 0.0), (1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]),
    );

    let msgs = storage.take();
    let LogMsg::Row(row) = &msgs[0] else {
        panic!("expected a row message");
    };

    // Just positions and the indicator: no radii batch of any kind. The
    // indicator's row count mirrors the point count.
    assert_eq!(row.batches.len(), 2);
    assert!(row.batches.iter().all(|batch| batch.num_instances() == 3));
}

// ---

/// Fails to serialize, after the sink has already seen nothing.
struct Unserializable;

impl AsComponents for Unserializable {
    fn as_component_batches(
        &self,
        _ctx: &SerializationContext<'_>,
    ) -> SerializationResult<Vec<ComponentBatch>> {
        Err(SerializationError::UnsupportedType {
            actual: "Unserializable".to_owned(),
            reason: "it says so in the name".to_owned(),
        })
    }
}

#[test]
fn failures_reach_the_sink_as_nothing_at_all() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test").memory().unwrap();

    // The first argument serializes fine, the second does not: the sink must
    // see nothing at all, not a partial submission.
    let points = Points3D::new([(0.0, 0.0, 0.0)]);
    let err = rec
        .try_log(
            "world",
            &[&points as &dyn AsComponents, &Unserializable],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RecordingStreamError::Serialization(SerializationError::UnsupportedType { .. })
    ));

    assert_eq!(storage.num_msgs(), 0);
}

#[test]
#[should_panic(expected = "strict mode")]
fn strict_mode_panics_on_failure() {
    let (rec, _storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    rec.log("world", &Unserializable);
}

#[test]
fn error_handler_sees_routed_errors() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let (rec, storage) = RecordingStreamBuilder::new("viz_test").memory().unwrap();

    let num_errors = Arc::new(AtomicUsize::new(0));
    let num_errors_clone = num_errors.clone();
    rec.set_error_handler(move |_err| {
        num_errors_clone.fetch_add(1, Ordering::SeqCst);
    });

    rec.log("world", &Unserializable);

    assert_eq!(num_errors.load(Ordering::SeqCst), 1);
    assert_eq!(storage.num_msgs(), 0);
}

// ---

#[test]
fn disabled_stream_is_a_no_op() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .enabled(false)
        .memory()
        .unwrap();

    assert!(!rec.is_enabled());

    rec.log("world/points", &Points3D::new([(0.0, 0.0, 0.0)]));
    rec.try_log("world/points", &Points3D::new([(0.0, 0.0, 0.0)]))
        .unwrap();

    assert_eq!(storage.num_msgs(), 0);
    assert!(storage.registered_types().is_empty());
    assert!(rec.try_serialize(&Collection::from(Radius(1.0))).unwrap().is_none());
}

// ---

#[test]
fn columns_reach_the_sink() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test")
        .strict(true)
        .memory()
        .unwrap();

    let positions: Vec<Position3D> = (0..6)
        .map(|i| Position3D::new(i as f32, 0.0, 0.0))
        .collect();
    let batch = rec
        .try_serialize_with_descriptor(
            &Collection::borrowed(&positions),
            Points3D::descriptor_positions(),
        )
        .unwrap()
        .unwrap();
    let column = batch.partitioned([2, 1, 3]).unwrap();

    let times = TimeColumn::new(Timeline::new_sequence("frame"), vec![0, 1, 2]);
    rec.send_columns("world/points", [times], [column]);

    let msgs = storage.take();
    assert_eq!(msgs.len(), 1);
    let LogMsg::Columns(columns) = &msgs[0] else {
        panic!("expected a columns message");
    };

    assert_eq!(columns.time_columns.len(), 1);
    assert_eq!(columns.time_columns[0].num_rows(), 3);
    assert_eq!(columns.columns.len(), 1);
    assert_eq!(columns.columns[0].num_rows(), 3);
}

#[test]
fn mismatched_column_lengths_are_rejected() {
    let (rec, storage) = RecordingStreamBuilder::new("viz_test").memory().unwrap();

    let radii: Vec<Radius> = vec![Radius(0.1), Radius(0.2), Radius(0.3)];
    let batch = rec
        .try_serialize(&Collection::borrowed(&radii))
        .unwrap()
        .unwrap();
    let column = batch.partitioned_unit().unwrap(); // 3 rows

    let times = TimeColumn::new(Timeline::new_sequence("frame"), vec![0, 1]); // 2 rows
    let err = rec
        .try_send_columns("world/points", [times], [column])
        .unwrap_err();

    assert!(matches!(
        err,
        RecordingStreamError::ColumnLengthMismatch {
            expected: 2,
            got: 3,
            ..
        }
    ));
    assert_eq!(storage.num_msgs(), 0);

    // And no time columns at all is its own error.
    let radii: Vec<Radius> = vec![Radius(0.1)];
    let batch = rec
        .try_serialize(&Collection::borrowed(&radii))
        .unwrap()
        .unwrap();
    let column = batch.partitioned_unit().unwrap();
    assert!(matches!(
        rec.try_send_columns("world/points", [], [column]),
        Err(RecordingStreamError::NoTimeColumns)
    ));
}
