//! Guard protocol behavior: transparency, stacking, and input checking.

use std::sync::{Arc, Mutex};

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use frame_guard::prelude::*;

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn ints(values: Vec<i64>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

fn sample_table() -> Table {
    init_tracing();
    Table::try_new(vec![("a", ints(vec![1, 2, 3]))]).unwrap()
}

/// A representative pipeline stage: doubles column "a" into a fresh table.
fn rebuild_doubled(table: &Table) -> Result<Table, GuardError> {
    let values = table.numeric("a")?;
    let doubled: Float64Array = values.iter().map(|v| v.map(|v| v * 2.0)).collect();
    Table::try_new(vec![("a", Arc::new(doubled) as ArrayRef)])
}

#[test]
fn passing_guard_is_transparent() {
    let guard = CheckSpec::none_missing().guard();
    let stage = guard.wrap(|table: Table| rebuild_doubled(&table));

    let expected = rebuild_doubled(&sample_table()).unwrap();
    let result = stage(sample_table()).unwrap();
    assert_eq!(result, expected);
}

#[test]
fn stage_errors_propagate_unmodified() {
    let guard = CheckSpec::none_missing().guard();
    let stage = guard.wrap(|table: Table| {
        table.column("does_not_exist")?;
        Ok::<_, GuardError>(table)
    });

    let error = stage(sample_table()).unwrap_err();
    assert!(matches!(error, GuardError::UnknownColumn(_)));
}

#[test]
fn stacked_guards_preserve_the_final_result() {
    let inner = CheckSpec::shape((3usize, 1usize)).guard();
    let outer = CheckSpec::none_missing().guard();

    let stage = inner.wrap(|table: Table| rebuild_doubled(&table));
    let stage = outer.wrap(stage);

    let expected = rebuild_doubled(&sample_table()).unwrap();
    assert_eq!(stage(sample_table()).unwrap(), expected);
}

#[test]
fn inner_guard_checks_first() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let recorder = |label: &'static str, order: Arc<Mutex<Vec<&'static str>>>| {
        CheckSpec::verify(label, move |_t: &Table| {
            order.lock().unwrap().push(label);
            true
        })
        .guard()
    };

    let inner = recorder("inner", order.clone());
    let outer = recorder("outer", order.clone());

    let stage = outer.wrap(inner.wrap(|table: Table| Ok::<_, GuardError>(table)));
    stage(sample_table()).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["inner", "outer"]);
}

#[test]
fn a_failing_inner_guard_stops_the_outer_one() {
    let outer_ran = Arc::new(Mutex::new(false));
    let observed = outer_ran.clone();

    let inner = CheckSpec::shape((99usize, 1usize)).guard();
    let outer = CheckSpec::verify("outer", move |_t: &Table| {
        *observed.lock().unwrap() = true;
        true
    })
    .guard();

    let stage = outer.wrap(inner.wrap(|table: Table| Ok::<_, GuardError>(table)));
    let error = stage(sample_table()).unwrap_err();

    assert_eq!(error.as_validation().unwrap().kind(), CheckKind::IsShape);
    assert!(!*outer_ran.lock().unwrap());
}

#[test]
fn input_checking_is_an_explicit_opt_in() {
    let make_stage = |guard: Guard| {
        guard.wrap(|_table: Table| {
            // the stage discards its bad input and fabricates clean output
            Ok::<_, GuardError>(sample_table())
        })
    };

    let with_null = Table::try_new(vec![(
        "a",
        Arc::new(Int64Array::from(vec![Some(1), None, Some(3)])) as ArrayRef,
    )])
    .unwrap();

    // Default: output-only, so the dirty input is never inspected.
    let lenient = make_stage(CheckSpec::none_missing().guard());
    assert!(lenient(with_null.clone()).is_ok());

    // Opted in: the input is rejected before the stage runs.
    let strict = make_stage(CheckSpec::none_missing().guard().with_input_check());
    let error = strict(with_null).unwrap_err();
    assert_eq!(error.as_validation().unwrap().kind(), CheckKind::NoneMissing);
}

#[test]
fn guards_compose_with_generic_verification() {
    let guard = CheckSpec::verify_all("a_positive", |table: &Table| {
        let values = table.numeric("a")?;
        let passing: arrow::array::BooleanArray = values
            .iter()
            .map(|v| Some(matches!(v, Some(v) if v > 0.0)))
            .collect();
        Mask::single(table.shared_index(), "a", passing)
    })
    .guard();

    let stage = guard.wrap_fn(|table: Table| table);
    assert!(stage(sample_table()).is_ok());

    let negative = Table::try_new(vec![("a", ints(vec![1, -2, 3]))]).unwrap();
    let error = stage(negative).unwrap_err();
    match error.as_validation().unwrap().report() {
        ViolationReport::Predicate {
            name,
            table,
            failing,
        } => {
            assert_eq!(name, "a_positive");
            assert_eq!(failing, &vec![Location::new(1i64, "a")]);
            assert!(table.is_none());
        }
        other => panic!("unexpected report {other:?}"),
    }
}

#[test]
fn a_predicate_failure_carries_the_rejected_table() {
    let guard = CheckSpec::verify("all_positive", |table: &Table| {
        table
            .numeric("a")
            .map(|values| values.iter().flatten().all(|v| v > 0.0))
            .unwrap_or(false)
    })
    .guard();

    // The stage consumes its table; the report snapshot is the only way the
    // caller can still see the data the predicate rejected.
    let stage = guard.wrap_fn(|table: Table| table);
    let bad = Table::try_new(vec![("a", ints(vec![-1, 2, 3]))]).unwrap();
    let error = stage(bad).unwrap_err();

    match error.as_validation().unwrap().report() {
        ViolationReport::Predicate {
            name,
            table: Some(snapshot),
            ..
        } => {
            assert_eq!(name, "all_positive");
            assert_eq!(snapshot.num_rows(), 3);
            assert_eq!(
                snapshot.column("a").unwrap(),
                &[CellValue::Int(-1), CellValue::Int(2), CellValue::Int(3)]
            );
        }
        other => panic!("unexpected report {other:?}"),
    }
}
