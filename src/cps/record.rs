//! Recording emissions and collecting synchronous output.

use super::callbacks::{Callback, Callbacks};
use super::function::Cps;
use super::shared::{ReferenceCounter, SharedCell, Value};

/// One output tuple delivered to one callback index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Emission<V> {
    /// Index of the callback that received the tuple.
    pub index: usize,
    /// The output tuple.
    pub values: Vec<V>,
}

struct Log<V> {
    emissions: Vec<Emission<V>>,
    closed: bool,
}

/// A callback tuple that remembers everything delivered to it.
///
/// Clones share the same log. After [`Recorder::close`] further emissions
/// are dropped.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Emission, Recorder};
///
/// let recorder = Recorder::new(2);
/// let callbacks = recorder.callbacks();
/// callbacks.emit(1, &["late"]);
/// recorder.close();
/// callbacks.emit(0, &["ignored"]);
///
/// assert_eq!(recorder.emissions(), vec![Emission { index: 1, values: vec!["late"] }]);
/// ```
pub struct Recorder<V> {
    arity: usize,
    log: ReferenceCounter<SharedCell<Log<V>>>,
}

impl<V: Value> Recorder<V> {
    /// Creates a recorder for a callback tuple of `arity` positions.
    #[must_use]
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            log: ReferenceCounter::new(SharedCell::new(Log {
                emissions: Vec::new(),
                closed: false,
            })),
        }
    }

    /// Returns the recording callback for `index`.
    pub fn callback(&self, index: usize) -> Callback<V> {
        let log = ReferenceCounter::clone(&self.log);
        ReferenceCounter::new(move |values: &[V]| {
            log.with(|log| {
                if !log.closed {
                    log.emissions.push(Emission {
                        index,
                        values: values.to_vec(),
                    });
                }
            });
        })
    }

    /// Returns a callback tuple with a recording callback at every position.
    pub fn callbacks(&self) -> Callbacks<V> {
        (0..self.arity)
            .map(|index| Some(self.callback(index)))
            .collect()
    }

    /// Returns every emission so far, in arrival order.
    pub fn emissions(&self) -> Vec<Emission<V>> {
        self.log.with(|log| log.emissions.clone())
    }

    /// Returns the output tuples delivered to `index`, in arrival order.
    pub fn values_at(&self, index: usize) -> Vec<Vec<V>> {
        self.log.with(|log| {
            log.emissions
                .iter()
                .filter(|emission| emission.index == index)
                .map(|emission| emission.values.clone())
                .collect()
        })
    }

    /// Returns the number of recorded emissions.
    pub fn len(&self) -> usize {
        self.log.with(|log| log.emissions.len())
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops recording.
    pub fn close(&self) {
        self.log.with(|log| log.closed = true);
    }

    /// Returns `true` once [`Recorder::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.log.with(|log| log.closed)
    }

    /// Returns the arity given at construction.
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

impl<V> Clone for Recorder<V> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            log: ReferenceCounter::clone(&self.log),
        }
    }
}

impl<V> std::fmt::Debug for Recorder<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Recorder")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Runs `cps` and returns the output tuples it delivered to its first
/// callback before `run` returned.
///
/// Emissions that arrive later, from callbacks the function stored away,
/// are ignored.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, collect_sync};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[1, 2]);
///     callbacks.emit(0, &[3]);
/// });
/// assert_eq!(collect_sync(&source), vec![vec![1, 2], vec![3]]);
/// ```
pub fn collect_sync<V: Value, R: 'static>(cps: &Cps<V, R>) -> Vec<Vec<V>> {
    let recorder = Recorder::new(1);
    cps.run(&recorder.callbacks());
    recorder.close();
    recorder.values_at(0)
}
