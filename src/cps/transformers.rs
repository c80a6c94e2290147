//! Transformer tuples and the shared closure types that fill their slots.
//!
//! A transformer tuple is aligned positionally with a callback tuple: slot
//! `i` governs emissions on callback `i` only. An empty slot (`None`) and a
//! position past the end of the tuple both mean "pass the emission through
//! unchanged".

use super::function::Cps;
use super::shared::{ReferenceCounter, Shareable, shared_fn};

shared_fn! {
    /// Turns an output tuple into a CPS function that is run with the full callback tuple.
    pub type Chainer<V> = Fn(&[V]) -> Cps<V>;
}

shared_fn! {
    /// Turns an output tuple into a single value.
    pub type Mapper<V> = Fn(&[V]) -> V;
}

shared_fn! {
    /// Turns an output tuple into a new output tuple.
    pub type SpreadMapper<V> = Fn(&[V]) -> Vec<V>;
}

shared_fn! {
    /// Decides whether an output tuple is let through.
    pub type Predicate<V> = Fn(&[V]) -> bool;
}

shared_fn! {
    /// Folds an output tuple into an accumulator.
    pub type Reducer<V> = Fn(V, &[V]) -> V;
}

shared_fn! {
    /// Folds an output tuple into a tuple-valued accumulator.
    pub type SpreadReducer<V> = Fn(&[V], &[V]) -> Vec<V>;
}

/// A function value delivered by the transformer side of `ap`.
pub type Transform<V> = Mapper<V>;

/// Wraps a closure as a [`Chainer`].
pub fn chainer<V, F>(function: F) -> Chainer<V>
where
    F: Fn(&[V]) -> Cps<V> + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`Mapper`].
pub fn mapper<V, F>(function: F) -> Mapper<V>
where
    F: Fn(&[V]) -> V + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`SpreadMapper`].
pub fn spread_mapper<V, F>(function: F) -> SpreadMapper<V>
where
    F: Fn(&[V]) -> Vec<V> + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`Predicate`].
pub fn predicate<V, F>(function: F) -> Predicate<V>
where
    F: Fn(&[V]) -> bool + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`Reducer`].
pub fn reducer<V, F>(function: F) -> Reducer<V>
where
    F: Fn(V, &[V]) -> V + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`SpreadReducer`].
pub fn spread_reducer<V, F>(function: F) -> SpreadReducer<V>
where
    F: Fn(&[V], &[V]) -> Vec<V> + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// Wraps a closure as a [`Transform`].
pub fn transform<V, F>(function: F) -> Transform<V>
where
    F: Fn(&[V]) -> V + Shareable + 'static,
{
    ReferenceCounter::new(function)
}

/// An ordered tuple of optional transformers.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Transformers, mapper};
///
/// let transformers = Transformers::new()
///     .nil()
///     .with(mapper(|values: &[i32]| values[0] + 1));
///
/// assert_eq!(transformers.len(), 2);
/// assert!(transformers.is_nil(0));
/// assert!(!transformers.is_nil(1));
/// assert!(transformers.is_nil(5));
/// ```
pub struct Transformers<T> {
    slots: Vec<Option<T>>,
}

impl<T> Transformers<T> {
    /// Creates an empty tuple.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends a transformer.
    #[must_use]
    pub fn with(mut self, transformer: T) -> Self {
        self.slots.push(Some(transformer));
        self
    }

    /// Appends an empty slot.
    #[must_use]
    pub fn nil(mut self) -> Self {
        self.slots.push(None);
        self
    }

    /// Returns the number of slots, empty ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the tuple has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if slot `index` is empty or past the end.
    pub fn is_nil(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    /// Returns the transformer at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the number of non-empty slots.
    pub fn count_present(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Iterates over the slots in order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.slots.iter().map(Option::as_ref)
    }
}

impl<T: Clone> Clone for Transformers<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<T> Default for Transformers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<Option<T>>> for Transformers<T> {
    fn from(slots: Vec<Option<T>>) -> Self {
        Self { slots }
    }
}

impl<T> FromIterator<Option<T>> for Transformers<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iterator: I) -> Self {
        Self {
            slots: iterator.into_iter().collect(),
        }
    }
}

impl<T> std::fmt::Debug for Transformers<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Transformers")
            .field("len", &self.len())
            .field("present", &self.count_present())
            .finish()
    }
}
