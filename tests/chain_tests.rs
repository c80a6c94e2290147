//! Integration tests for the `chain` operator.

#![cfg(feature = "cps")]

use cpskit::cps::{
    Callbacks, Cps, Operator, Recorder, Transformers, chain, chainer, collect_sync, empty, of, of_n,
};
use rstest::rstest;

fn emit_42() -> Cps<i32> {
    Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[42]);
    })
}

// =============================================================================
// Basic behaviour
// =============================================================================

#[rstest]
fn test_chain_doubles_single_output() {
    let doubled = chain([Some(chainer(|values: &[i32]| of([values[0] * 2])))]).apply(&emit_42());
    assert_eq!(collect_sync(&doubled), vec![vec![84]]);
}

#[rstest]
fn test_chain_over_tuple_output() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[5, 2]);
    });
    let difference = chain([Some(chainer(|values: &[i32]| of([values[0] - values[1]])))]).apply(&source);
    assert_eq!(collect_sync(&difference), vec![vec![3]]);
}

#[rstest]
fn test_chainer_emitting_several_times() {
    let twice = chainer(|values: &[i32]| {
        let value = values[0];
        Cps::new(move |callbacks: &Callbacks<i32>| {
            callbacks.emit(0, &[value]);
            callbacks.emit(0, &[value + 1]);
        })
    });
    let chained = chain([Some(twice)]).apply(&emit_42());
    assert_eq!(collect_sync(&chained), vec![vec![42], vec![43]]);
}

#[rstest]
fn test_chainer_receives_full_callback_tuple() {
    let recorder = Recorder::new(3);
    chain([Some(chainer(|values: &[i32]| of_n(2, [values[0]])))])
        .apply(&emit_42())
        .run(&recorder.callbacks());
    assert!(recorder.values_at(0).is_empty());
    assert_eq!(recorder.values_at(2), vec![vec![42]]);
}

#[rstest]
fn test_chainer_can_drop_emission() {
    let dropped = chain([Some(chainer(|_: &[i32]| empty()))]).apply(&emit_42());
    assert!(collect_sync(&dropped).is_empty());
}

// =============================================================================
// Index alignment and pass-through
// =============================================================================

#[rstest]
fn test_chain_with_fewer_chainers_keeps_extra_outputs() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[0]);
        callbacks.emit(1, &[2]);
    });
    let recorder = Recorder::new(2);
    chain([Some(chainer(|values: &[i32]| of([values[0] + 1])))])
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(0), vec![vec![1]]);
    assert_eq!(recorder.values_at(1), vec![vec![2]]);
}

#[rstest]
fn test_chain_nil_first_chainer() {
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[7]);
        callbacks.emit(1, &[8]);
    });
    let recorder = Recorder::new(2);
    chain([None, Some(chainer(|values: &[i32]| of_n(1, [values[0] * 10])))])
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(0), vec![vec![7]]);
    assert_eq!(recorder.values_at(1), vec![vec![80]]);
}

#[rstest]
fn test_chain_accepts_transformers_builder() {
    let transformers = Transformers::new()
        .nil()
        .with(chainer(|values: &[i32]| of_n(1, [values[0] - 1])));
    let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(1, &[1]);
    });
    let recorder = Recorder::new(2);
    chain(transformers.iter().map(|slot| slot.cloned()))
        .apply(&source)
        .run(&recorder.callbacks());
    assert_eq!(recorder.values_at(1), vec![vec![0]]);
}

#[rstest]
fn test_chain_on_hole_callback_drops_silently() {
    let recorder = Recorder::<i32>::new(2);
    let callbacks = Callbacks::new().skip().with_callback(recorder.callback(1));
    chain([Some(chainer(|values: &[i32]| of([values[0]])))])
        .apply(&emit_42())
        .run(&callbacks);
    assert!(recorder.is_empty());
}

// =============================================================================
// Return value and metadata
// =============================================================================

#[rstest]
fn test_chain_preserves_return_value() {
    let source: Cps<i32, i32> = Cps::new(|callbacks: &Callbacks<i32>| {
        callbacks.emit(0, &[1]);
        10
    });
    let chained = chain([Some(chainer(|values: &[i32]| of([values[0]])))]).apply(&source);
    let recorder = Recorder::new(1);
    assert_eq!(chained.run(&recorder.callbacks()), 10);
}

#[rstest]
fn test_chain_nested() {
    let inner = chain([Some(chainer(|values: &[i32]| of([values[0] + 1])))]);
    let outer = chain([Some(chainer(|values: &[i32]| of([values[0] * 3])))]);
    let composed = outer.apply(&inner.apply(&emit_42()));
    assert_eq!(collect_sync(&composed), vec![vec![129]]);
}
