//! The CPS function value and the operator trait.
//!
//! A [`Cps`] wraps a body `Fn(&Callbacks<V>) -> R` together with its
//! [`Metadata`]. Running it hands the body a callback tuple; the body may
//! emit to any of the callbacks any number of times, synchronously or by
//! storing the tuple for later, and its return value is passed back to the
//! caller of [`Cps::run`].

use std::any::Any;

use super::callbacks::Callbacks;
use super::metadata::Metadata;
use super::shared::{ReferenceCounter, Shareable, shared_fn};

shared_fn! {
    type Body<V, R> = Fn(&Callbacks<V>) -> R;
}

/// A continuation-passing-style function over values of type `V`.
///
/// `R` is the return value of a run; combinators preserve it, so a derived
/// function returns exactly what the function it wraps returns.
///
/// `Cps` is an immutable value. Combinators and [`Cps::with_metadata`]
/// return new values and never alter the one they start from.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Cps, Recorder};
///
/// let answer: Cps<i32, &str> = Cps::new(|callbacks| {
///     callbacks.emit(0, &[42]);
///     "done"
/// });
///
/// let recorder = Recorder::new(1);
/// assert_eq!(answer.run(&recorder.callbacks()), "done");
/// assert_eq!(recorder.values_at(0), vec![vec![42]]);
/// ```
pub struct Cps<V, R = ()> {
    body: Body<V, R>,
    metadata: Metadata,
}

impl<V: 'static, R: 'static> Cps<V, R> {
    /// Creates a CPS function from its body.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&Callbacks<V>) -> R + Shareable + 'static,
    {
        Self::with_parts(body, Metadata::new())
    }

    /// Runs the function with the given callback tuple.
    pub fn run(&self, callbacks: &Callbacks<V>) -> R {
        (self.body)(callbacks)
    }

    /// Returns the metadata record.
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns a copy of this function carrying `value` in its metadata.
    #[must_use]
    pub fn with_metadata<T: Any + Shareable>(&self, value: T) -> Self {
        Self {
            body: ReferenceCounter::clone(&self.body),
            metadata: self.metadata.with(value),
        }
    }

    /// Applies an operator, `operator.apply(self)`.
    #[must_use]
    pub fn pipe<O: Operator<V>>(&self, operator: &O) -> Self {
        operator.apply(self)
    }

    /// Creates a function with a new body that keeps this function's metadata.
    pub(crate) fn derive<F>(&self, body: F) -> Self
    where
        F: Fn(&Callbacks<V>) -> R + Shareable + 'static,
    {
        Self::with_parts(body, self.metadata.clone())
    }

    fn with_parts<F>(body: F, metadata: Metadata) -> Self
    where
        F: Fn(&Callbacks<V>) -> R + Shareable + 'static,
    {
        let body: Body<V, R> = ReferenceCounter::new(body);
        Self { body, metadata }
    }
}

impl<V, R> Clone for Cps<V, R> {
    fn clone(&self) -> Self {
        Self {
            body: ReferenceCounter::clone(&self.body),
            metadata: self.metadata.clone(),
        }
    }
}

impl<V, R> std::fmt::Debug for Cps<V, R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Cps")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// The second, curried step of a combinator: `combinator(...)(source)`.
///
/// Operators are built once from their transformer tuple and can be applied
/// to any number of sources. Each application produces an independent CPS
/// function that carries the source's metadata.
pub trait Operator<V> {
    /// Wraps `source`, returning the transformed CPS function.
    fn apply<R: 'static>(&self, source: &Cps<V, R>) -> Cps<V, R>;
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Cps<i32>: Send, Sync, Clone);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Cps<i32>: Send, Sync);
