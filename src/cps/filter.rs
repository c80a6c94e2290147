//! `filter`: drop emissions per callback index.

use super::chain::{Chain, chain};
use super::of::{empty, of_n};
use super::shared::{ReferenceCounter, Value};
use super::transformers::{Chainer, Predicate};

/// Builds the `filter` operator: slot `i` decides which tuples on callback `i` go through.
///
/// A rejected tuple is dropped silently. Predicate `i` governs callback `i`
/// only; indices without a predicate pass everything.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, Operator, Recorder, filter, predicate};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[42]);
///     callbacks.emit(0, &[33]);
/// });
/// let large = filter([Some(predicate(|values: &[i32]| values[0] > 35))]).apply(&source);
///
/// let recorder = Recorder::new(1);
/// large.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![42]]);
/// ```
pub fn filter<V, I>(predicates: I) -> Chain<V>
where
    V: Value,
    I: IntoIterator<Item = Option<Predicate<V>>>,
{
    chain(
        predicates
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.map(|predicate| gate(index, predicate))),
    )
}

fn gate<V: Value>(index: usize, predicate: Predicate<V>) -> Chainer<V> {
    ReferenceCounter::new(move |values: &[V]| {
        if predicate(values) {
            of_n(index, values.to_vec())
        } else {
            empty()
        }
    })
}
