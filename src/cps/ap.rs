//! `ap`: join a CPS function with CPS functions that deliver transforms.
//!
//! Producer `j` pairs with emissions on callback `j` of the source. The
//! producer is run with one relay per callback index `k` of the caller; a
//! transform it delivers on relay `k` is cached at `(j, k)`. The source's
//! emissions on `j` are cached as the latest argument tuple for `j`. Whenever
//! both sides of a pair are known, the transform is applied to the argument
//! and the result goes to callback `k`, so the outcome does not depend on
//! which side arrives first. Only the latest value of each kind is kept.
//!
//! Relay `k` always targets callback `k`, whatever the producer's position.
//! A producer at position 1 that should answer emissions on callback 1 emits
//! on its relay 1; emitting on relay 0 would send the result to callback 0.
//!
//! The caches live for one run of the joined function. Under the `arc`
//! feature they sit behind a mutex, so relays may be driven from several
//! threads. Callbacks are always invoked after the cache is released.

use std::collections::BTreeMap;

use super::callbacks::{Callback, Callbacks};
use super::function::{Cps, Operator};
use super::shared::{ReferenceCounter, Shareable, SharedCell, Value, trace_event};
use super::transformers::{Transform, Transformers, transform};

/// Operator returned by [`ap`].
pub struct Ap<V> {
    producers: Transformers<Cps<Transform<V>>>,
}

/// Builds the `ap` operator from a tuple of optional transform producers.
///
/// A producer only delivers the first value of each emission. Source indices
/// without a producer pass through.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Cps, Operator, Recorder, Transform, ap, of, transform};
///
/// let double: Cps<Transform<i32>> = of([transform(|values: &[i32]| values[0] * 2)]);
/// let joined = ap([Some(double)]).apply(&of([42]));
///
/// let recorder = Recorder::new(1);
/// joined.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![84]]);
/// ```
pub fn ap<V, I>(producers: I) -> Ap<V>
where
    I: IntoIterator<Item = Option<Cps<Transform<V>>>>,
{
    Ap {
        producers: producers.into_iter().collect(),
    }
}

impl<V> Ap<V> {
    /// Returns the producer tuple.
    pub const fn producers(&self) -> &Transformers<Cps<Transform<V>>> {
        &self.producers
    }
}

impl<V: Value> Operator<V> for Ap<V> {
    fn apply<R: 'static>(&self, source: &Cps<V, R>) -> Cps<V, R> {
        let producers = self.producers.clone();
        let inner = source.clone();
        source.derive(move |callbacks: &Callbacks<V>| {
            let join = ReferenceCounter::new(JoinCache::new(producers.len()));
            for (producer_index, slot) in producers.iter().enumerate() {
                if let Some(producer) = slot {
                    let relays: Callbacks<Transform<V>> = (0..callbacks.len())
                        .map(|target| Some(transform_relay(&join, producer_index, target, callbacks)))
                        .collect();
                    producer.run(&relays);
                }
            }
            let relays: Vec<Option<Callback<V>>> = producers
                .iter()
                .enumerate()
                .map(|(index, slot)| match slot {
                    Some(_) => Some(argument_relay(&join, index, callbacks)),
                    None => callbacks.get(index).cloned(),
                })
                .collect();
            inner.run(&callbacks.merge_relays(&relays))
        })
    }
}

impl<V> Clone for Ap<V> {
    fn clone(&self) -> Self {
        Self {
            producers: self.producers.clone(),
        }
    }
}

impl<V> std::fmt::Debug for Ap<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Ap")
            .field("producers", &self.producers)
            .finish()
    }
}

struct JoinSlot<V> {
    argument: Option<Vec<V>>,
    transforms: BTreeMap<usize, Transform<V>>,
}

struct JoinCache<V> {
    slots: SharedCell<Vec<JoinSlot<V>>>,
}

impl<V: Value> JoinCache<V> {
    fn new(producer_count: usize) -> Self {
        let slots = (0..producer_count)
            .map(|_| JoinSlot {
                argument: None,
                transforms: BTreeMap::new(),
            })
            .collect();
        Self {
            slots: SharedCell::new(slots),
        }
    }

    /// Stores the argument for `producer` and returns every transform waiting for it.
    fn accept_argument(&self, producer: usize, values: &[V]) -> Vec<(usize, Transform<V>)> {
        self.slots.with(|slots| {
            slots.get_mut(producer).map_or_else(Vec::new, |slot| {
                slot.argument = Some(values.to_vec());
                slot.transforms
                    .iter()
                    .map(|(target, function)| (*target, ReferenceCounter::clone(function)))
                    .collect()
            })
        })
    }

    /// Stores the transform at `(producer, target)` and returns the argument, if any.
    fn accept_transform(&self, producer: usize, target: usize, function: &Transform<V>) -> Option<Vec<V>> {
        self.slots.with(|slots| {
            slots.get_mut(producer).and_then(|slot| {
                slot.transforms
                    .insert(target, ReferenceCounter::clone(function));
                slot.argument.clone()
            })
        })
    }
}

fn argument_relay<V: Value>(
    join: &ReferenceCounter<JoinCache<V>>,
    producer: usize,
    callbacks: &Callbacks<V>,
) -> Callback<V> {
    let join = ReferenceCounter::clone(join);
    let callbacks = callbacks.clone();
    ReferenceCounter::new(move |values: &[V]| {
        trace_event!(producer, "ap cached argument");
        for (target, function) in join.accept_argument(producer, values) {
            trace_event!(producer, target, "ap joined on argument");
            callbacks.emit(target, &[function(values)]);
        }
    })
}

fn transform_relay<V: Value>(
    join: &ReferenceCounter<JoinCache<V>>,
    producer: usize,
    target: usize,
    callbacks: &Callbacks<V>,
) -> Callback<Transform<V>> {
    let join = ReferenceCounter::clone(join);
    let callbacks = callbacks.clone();
    ReferenceCounter::new(move |functions: &[Transform<V>]| {
        let Some(function) = functions.first() else {
            return;
        };
        trace_event!(producer, target, "ap cached transform");
        if let Some(argument) = join.accept_transform(producer, target, function) {
            trace_event!(producer, target, "ap joined on transform");
            callbacks.emit(target, &[function(&argument)]);
        }
    })
}

/// Lifts a binary function over two CPS functions.
///
/// The latest output of `first` on its first callback is the left argument
/// tuple and each output of `second` on its first callback the right one;
/// `function(left, right)` is emitted on the first callback once both are
/// known. Other callbacks of `second` pass through and other callbacks of
/// `first` are ignored. Running the result returns what `second` returns.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Recorder, lift2, of};
///
/// let difference = lift2(|left: &[i32], right: &[i32]| left[0] - right[0], &of([42]), &of([4]));
///
/// let recorder = Recorder::new(1);
/// difference.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![38]]);
/// ```
pub fn lift2<V, R1, R, F>(function: F, first: &Cps<V, R1>, second: &Cps<V, R>) -> Cps<V, R>
where
    V: Value,
    R1: 'static,
    R: 'static,
    F: Fn(&[V], &[V]) -> V + Shareable + 'static,
{
    let function = ReferenceCounter::new(function);
    let first = first.clone();
    let producer: Cps<Transform<V>> = Cps::new(move |relays: &Callbacks<Transform<V>>| {
        let function = ReferenceCounter::clone(&function);
        let relays = relays.clone();
        let left_side = Callbacks::new().with(move |left: &[V]| {
            let left = left.to_vec();
            let function = ReferenceCounter::clone(&function);
            relays.emit(0, &[transform(move |right: &[V]| function(&left, right))]);
        });
        first.run(&left_side);
    });
    ap([Some(producer)]).apply(second)
}
