//! The callback tuple handed to a CPS function.
//!
//! A [`Callbacks`] value is an ordered list of optional callbacks. A CPS
//! function delivers each output tuple by calling [`Callbacks::emit`] with a
//! callback index; the same index may be emitted to any number of times.
//! Indices that are out of range or hold a hole swallow the emission.

use smallvec::SmallVec;

use super::shared::{ReferenceCounter, Shareable, shared_fn};
use crate::compose::merge_array;

shared_fn! {
    /// A shared callback receiving one output tuple per invocation.
    pub type Callback<V> = Fn(&[V]);
}

/// Callback tuples rarely exceed a success, an error and an end channel.
type Slots<V> = SmallVec<[Option<Callback<V>>; 4]>;

/// An ordered tuple of optional callbacks.
///
/// Cloning is cheap: only the reference counts of the callbacks change.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Recorder};
///
/// let recorder = Recorder::<i32>::new(1);
/// let callbacks = Callbacks::new()
///     .skip()
///     .with_callback(recorder.callback(0));
///
/// assert!(!callbacks.emit(0, &[1]));
/// assert!(callbacks.emit(1, &[2, 3]));
/// assert!(!callbacks.emit(7, &[4]));
/// assert_eq!(recorder.values_at(0), vec![vec![2, 3]]);
/// ```
pub struct Callbacks<V> {
    slots: Slots<V>,
}

impl<V> Callbacks<V> {
    /// Creates an empty callback tuple.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SmallVec::new(),
        }
    }

    /// Appends a callback built from a closure.
    #[must_use]
    pub fn with<F>(self, callback: F) -> Self
    where
        F: Fn(&[V]) + Shareable + 'static,
    {
        let callback: Callback<V> = ReferenceCounter::new(callback);
        self.with_callback(callback)
    }

    /// Appends an already shared callback.
    #[must_use]
    pub fn with_callback(mut self, callback: Callback<V>) -> Self {
        self.slots.push(Some(callback));
        self
    }

    /// Appends a hole: emissions to this index are dropped.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.slots.push(None);
        self
    }

    /// Returns the number of positions, holes included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the tuple has no positions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the callback at `index`, or `None` for holes and out-of-range indices.
    pub fn get(&self, index: usize) -> Option<&Callback<V>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Delivers `values` to the callback at `index`.
    ///
    /// Returns `false` without doing anything when there is no callback at
    /// `index`.
    pub fn emit(&self, index: usize, values: &[V]) -> bool {
        match self.get(index) {
            Some(callback) => {
                callback(values);
                true
            }
            None => false,
        }
    }

    /// Replaces the first positions with `relays` and keeps the rest.
    pub(crate) fn merge_relays(&self, relays: &[Option<Callback<V>>]) -> Self {
        Self {
            slots: merge_array(relays, &self.slots).into_iter().collect(),
        }
    }
}

impl<V> Clone for Callbacks<V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<V> Default for Callbacks<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<Option<Callback<V>>> for Callbacks<V> {
    fn from_iter<I: IntoIterator<Item = Option<Callback<V>>>>(iterator: I) -> Self {
        Self {
            slots: iterator.into_iter().collect(),
        }
    }
}

impl<V> std::fmt::Debug for Callbacks<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Callbacks")
            .field(
                "slots",
                &self
                    .slots
                    .iter()
                    .map(|slot| if slot.is_some() { "callback" } else { "hole" })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
