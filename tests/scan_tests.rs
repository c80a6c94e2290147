//! Integration tests for the `scan` operator and `Accumulator`.

#![cfg(feature = "cps")]

use cpskit::cps::{
    Accumulator, Callbacks, Cps, Operator, Recorder, Reducer, ScanError, collect_sync, reducer,
    scan, scan_seeded,
};
use rstest::rstest;

fn add() -> Reducer<i32> {
    reducer(|total: i32, values: &[i32]| total + values.iter().sum::<i32>())
}

fn emit_2_then_8() -> Cps<i32> {
    Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[2]);
        callbacks.emit(0, &[8]);
    })
}

// =============================================================================
// scan(reducers, seed)
// =============================================================================

#[rstest]
fn test_scan_running_sum() {
    let sums = scan([Some(add())], Some(10)).unwrap().apply(&emit_2_then_8());
    assert_eq!(collect_sync(&sums), vec![vec![12], vec![20]]);
}

#[rstest]
fn test_scan_reducer_sees_whole_tuple() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[1, 2, 3]);
        callbacks.emit(0, &[4]);
    });
    let sums = scan([Some(add())], Some(0)).unwrap().apply(&source);
    assert_eq!(collect_sync(&sums), vec![vec![6], vec![10]]);
}

#[rstest]
fn test_scan_indices_keep_separate_state() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[1]);
        callbacks.emit(1, &[100]);
        callbacks.emit(0, &[1]);
        callbacks.emit(1, &[100]);
    });
    let recorder = Recorder::new(2);
    scan([Some(add()), Some(add())], Some(0))
        .unwrap()
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(0), vec![vec![1], vec![2]]);
    assert_eq!(recorder.values_at(1), vec![vec![100], vec![200]]);
}

#[rstest]
fn test_scan_nil_reducer_passes_through() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[1, 1]);
        callbacks.emit(1, &[5]);
        callbacks.emit(1, &[5]);
    });
    let recorder = Recorder::new(2);
    scan([None, Some(add())], Some(0))
        .unwrap()
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(0), vec![vec![1, 1]]);
    assert_eq!(recorder.values_at(1), vec![vec![5], vec![10]]);
}

#[rstest]
fn test_scan_state_continues_over_runs() {
    let sums = scan([Some(add())], Some(10)).unwrap().apply(&emit_2_then_8());
    assert_eq!(collect_sync(&sums), vec![vec![12], vec![20]]);
    assert_eq!(collect_sync(&sums), vec![vec![22], vec![30]]);
}

#[rstest]
#[case(Vec::new(), Some(0), ScanError::MissingReducer)]
#[case(vec![None, None], Some(0), ScanError::MissingReducer)]
#[case(vec![Some(add())], None, ScanError::MissingSeed)]
#[case(Vec::new(), None, ScanError::MissingReducer)]
fn test_scan_rejects_missing_arguments(
    #[case] reducers: Vec<Option<Reducer<i32>>>,
    #[case] seed: Option<i32>,
    #[case] expected: ScanError,
) {
    assert_eq!(scan(reducers, seed).err(), Some(expected));
}

#[rstest]
fn test_scan_error_message() {
    let error = scan([Some(add())], None).err();
    assert_eq!(
        error.map(|error| error.to_string()),
        Some("scan requires a seed value".to_owned())
    );
}

// =============================================================================
// scan_seeded(seeds, reducers)
// =============================================================================

#[rstest]
fn test_scan_seeded_per_index_seeds() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[1]);
        callbacks.emit(1, &[1]);
    });
    let recorder = Recorder::new(2);
    scan_seeded([Some(10), Some(20)], [Some(add()), Some(add())])
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(0), vec![vec![11]]);
    assert_eq!(recorder.values_at(1), vec![vec![21]]);
}

#[rstest]
fn test_scan_seeded_nil_seed_starts_from_default() {
    let collected = scan_seeded([None], [Some(add())]).apply(&emit_2_then_8());
    assert_eq!(collect_sync(&collected), vec![vec![2], vec![10]]);
}

#[rstest]
fn test_scan_seeded_without_reducers_is_identity() {
    let unchanged = scan_seeded([Some(5)], Vec::new()).apply(&emit_2_then_8());
    assert_eq!(collect_sync(&unchanged), vec![vec![2], vec![8]]);
}

#[rstest]
fn test_scan_seeded_collects_strings() {
    let source: Cps<String> = Cps::new(|callbacks: &Callbacks<String>| {
        callbacks.emit(0, &["a".to_owned()]);
        callbacks.emit(0, &["b".to_owned()]);
    });
    let joined = scan_seeded(
        [None],
        [Some(reducer(|state: String, values: &[String]| state + &values[0]))],
    )
    .apply(&source);
    assert_eq!(
        collect_sync(&joined),
        vec![vec!["a".to_owned()], vec!["ab".to_owned()]]
    );
}

// =============================================================================
// Accumulator
// =============================================================================

#[rstest]
fn test_accumulator_updates() {
    let accumulator = Accumulator::new(add(), 10);
    assert_eq!(accumulator.update(&[1]), 11);
    assert_eq!(accumulator.update(&[2]), 13);
    assert_eq!(accumulator.update(&[-1]), 12);
    assert_eq!(accumulator.current(), 12);
}

#[rstest]
fn test_accumulator_with_several_values() {
    let accumulator = Accumulator::new(add(), 0);
    assert_eq!(accumulator.update(&[1, 2]), 3);
    assert_eq!(accumulator.update(&[]), 3);
}
