//! `map` and `map_spread`: value transforms per callback index.
//!
//! Both are `chain` with chainers that re-emit the transformed tuple on the
//! same index through [`of_n`].

use super::chain::{Chain, chain};
use super::of::of_n;
use super::shared::{ReferenceCounter, Value};
use super::transformers::{Chainer, Mapper, SpreadMapper};

/// Builds the `map` operator: slot `i` turns each tuple on callback `i` into one value.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, Operator, Recorder, map, mapper};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[42, 24]);
///     callbacks.emit(1, &[23]);
/// });
/// let mapped = map([Some(mapper(|values: &[i32]| values[0] - values[1]))]).apply(&source);
///
/// let recorder = Recorder::new(2);
/// mapped.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![18]]);
/// assert_eq!(recorder.values_at(1), vec![vec![23]]);
/// ```
pub fn map<V, I>(mappers: I) -> Chain<V>
where
    V: Value,
    I: IntoIterator<Item = Option<Mapper<V>>>,
{
    chain(
        mappers
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.map(|mapper| re_emit(index, mapper))),
    )
}

/// Builds the `map_spread` operator: slot `i` turns each tuple on callback `i` into a new tuple.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Operator, Recorder, map_spread, of, spread_mapper};
///
/// let spread = map_spread([Some(spread_mapper(|values: &[i32]| vec![values[0], values[0] * 2]))])
///     .apply(&of([42]));
///
/// let recorder = Recorder::new(1);
/// spread.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![42, 84]]);
/// ```
pub fn map_spread<V, I>(mappers: I) -> Chain<V>
where
    V: Value,
    I: IntoIterator<Item = Option<SpreadMapper<V>>>,
{
    chain(
        mappers
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.map(|mapper| re_emit_spread(index, mapper))),
    )
}

fn re_emit<V: Value>(index: usize, mapper: Mapper<V>) -> Chainer<V> {
    ReferenceCounter::new(move |values: &[V]| of_n(index, [mapper(values)]))
}

fn re_emit_spread<V: Value>(index: usize, mapper: SpreadMapper<V>) -> Chainer<V> {
    ReferenceCounter::new(move |values: &[V]| of_n(index, mapper(values)))
}
