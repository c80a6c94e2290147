//! `scan`: running accumulators per callback index.
//!
//! Each index with a reducer owns one [`Accumulator`]. Every emission on
//! that index folds the output tuple into the accumulator and re-emits the
//! new accumulator value, alone, on the same index. The accumulators are
//! created when the operator is applied and live as long as the produced
//! CPS function, so the fold continues across repeated runs.

use super::chain::chain;
use super::error::ScanError;
use super::function::{Cps, Operator};
use super::of::of_n;
use super::shared::{ReferenceCounter, SharedCell, Value, trace_event};
use super::transformers::{Chainer, Reducer, SpreadReducer, Transformers};

/// A reducer paired with its running state.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Accumulator, reducer};
///
/// let add = Accumulator::new(reducer(|state: i32, values: &[i32]| state + values.iter().sum::<i32>()), 10);
/// assert_eq!(add.update(&[1]), 11);
/// assert_eq!(add.update(&[2]), 13);
/// assert_eq!(add.update(&[-1]), 12);
/// assert_eq!(add.current(), 12);
/// ```
pub struct Accumulator<V> {
    reducer: Reducer<V>,
    state: SharedCell<V>,
}

impl<V: Value> Accumulator<V> {
    /// Creates an accumulator starting from `seed`.
    pub fn new(reducer: Reducer<V>, seed: V) -> Self {
        Self {
            reducer,
            state: SharedCell::new(seed),
        }
    }

    /// Folds `values` into the state and returns the new state.
    ///
    /// The reducer runs while the state is held, so a fold is atomic when
    /// several threads update the same accumulator under `arc`.
    ///
    /// # Panics
    ///
    /// The reducer must not call back into this accumulator. Doing so panics
    /// on the re-borrow, or deadlocks under `arc`.
    pub fn update(&self, values: &[V]) -> V {
        self.state.with(|state| {
            let next = (self.reducer)(state.clone(), values);
            *state = next.clone();
            next
        })
    }

    /// Returns the current state.
    pub fn current(&self) -> V {
        self.state.with(|state| state.clone())
    }
}

impl<V> std::fmt::Debug for Accumulator<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Accumulator")
            .finish_non_exhaustive()
    }
}

/// A spread reducer paired with a running state tuple.
///
/// Unlike [`Accumulator`], the state is a whole tuple and the reducer
/// returns the next tuple in full. Same re-entrancy rule as
/// [`Accumulator::update`].
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{SpreadAccumulator, spread_reducer};
///
/// let concat = SpreadAccumulator::new(
///     spread_reducer(|state: &[i32], values: &[i32]| [state, values].concat()),
///     [0, 0],
/// );
/// assert_eq!(concat.update(&[1]), vec![0, 0, 1]);
/// assert_eq!(concat.update(&[]), vec![0, 0, 1]);
/// ```
pub struct SpreadAccumulator<V> {
    reducer: SpreadReducer<V>,
    state: SharedCell<Vec<V>>,
}

impl<V: Value> SpreadAccumulator<V> {
    /// Creates an accumulator whose state starts as `seed`.
    pub fn new(reducer: SpreadReducer<V>, seed: impl IntoIterator<Item = V>) -> Self {
        Self {
            reducer,
            state: SharedCell::new(seed.into_iter().collect()),
        }
    }

    /// Folds `values` into the state tuple and returns the new tuple.
    pub fn update(&self, values: &[V]) -> Vec<V> {
        self.state.with(|state| {
            let next = (self.reducer)(state.as_slice(), values);
            state.clone_from(&next);
            next
        })
    }

    /// Returns the current state tuple.
    pub fn current(&self) -> Vec<V> {
        self.state.with(|state| state.clone())
    }
}

impl<V> std::fmt::Debug for SpreadAccumulator<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SpreadAccumulator")
            .finish_non_exhaustive()
    }
}

/// Operator returned by [`scan`] and [`scan_seeded`].
pub struct Scan<V> {
    reducers: Transformers<Reducer<V>>,
    seeds: Vec<V>,
}

/// Builds the `scan` operator with one seed shared by every reducer slot.
///
/// # Errors
///
/// Returns [`ScanError::MissingReducer`] when no slot holds a reducer and
/// [`ScanError::MissingSeed`] when `seed` is `None`.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, Operator, Recorder, reducer, scan};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[2]);
///     callbacks.emit(0, &[8]);
/// });
/// let sums = scan([Some(reducer(|total: i32, values: &[i32]| total + values[0]))], Some(10))?
///     .apply(&source);
///
/// let recorder = Recorder::new(1);
/// sums.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![12], vec![20]]);
/// # Ok::<(), cpskit::cps::ScanError>(())
/// ```
pub fn scan<V, I>(reducers: I, seed: Option<V>) -> Result<Scan<V>, ScanError>
where
    V: Value,
    I: IntoIterator<Item = Option<Reducer<V>>>,
{
    let reducers: Transformers<Reducer<V>> = reducers.into_iter().collect();
    if reducers.count_present() == 0 {
        trace_event!("scan rejected: no reducer supplied");
        return Err(ScanError::MissingReducer);
    }
    let Some(seed) = seed else {
        trace_event!("scan rejected: no seed supplied");
        return Err(ScanError::MissingSeed);
    };
    let seeds = vec![seed; reducers.len()];
    Ok(Scan { reducers, seeds })
}

/// Builds the `scan` operator with one seed per index.
///
/// A `None` seed starts that index from `V::default()`. A reducer at an
/// index beyond the seed tuple is ignored and the index passes through.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, Operator, Recorder, reducer, scan_seeded};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[2]);
///     callbacks.emit(1, &[3]);
///     callbacks.emit(1, &[4]);
/// });
/// let add = reducer(|total: i32, values: &[i32]| total + values[0]);
/// let sums = scan_seeded([Some(100), None], [Some(add.clone()), Some(add)]).apply(&source);
///
/// let recorder = Recorder::new(2);
/// sums.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![102]]);
/// assert_eq!(recorder.values_at(1), vec![vec![3], vec![7]]);
/// ```
pub fn scan_seeded<V, S, I>(seeds: S, reducers: I) -> Scan<V>
where
    V: Value + Default,
    S: IntoIterator<Item = Option<V>>,
    I: IntoIterator<Item = Option<Reducer<V>>>,
{
    let seeds: Vec<V> = seeds.into_iter().map(Option::unwrap_or_default).collect();
    let reducers = reducers
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.filter(|_| index < seeds.len()))
        .collect();
    Scan { reducers, seeds }
}

impl<V> Scan<V> {
    /// Returns the reducer tuple.
    pub const fn reducers(&self) -> &Transformers<Reducer<V>> {
        &self.reducers
    }
}

impl<V: Value> Operator<V> for Scan<V> {
    fn apply<R: 'static>(&self, source: &Cps<V, R>) -> Cps<V, R> {
        let chainers = self
            .reducers
            .iter()
            .zip(&self.seeds)
            .enumerate()
            .map(|(index, (slot, seed))| {
                slot.map(|reducer| {
                    let accumulator = Accumulator::new(ReferenceCounter::clone(reducer), seed.clone());
                    fold_and_emit(index, accumulator)
                })
            });
        chain(chainers).apply(source)
    }
}

impl<V: Clone> Clone for Scan<V> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
            seeds: self.seeds.clone(),
        }
    }
}

impl<V> std::fmt::Debug for Scan<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Scan")
            .field("reducers", &self.reducers)
            .finish_non_exhaustive()
    }
}

fn fold_and_emit<V: Value>(index: usize, accumulator: Accumulator<V>) -> Chainer<V> {
    ReferenceCounter::new(move |values: &[V]| of_n(index, [accumulator.update(values)]))
}
