//! Method-style access to the combinators.
//!
//! `cps(body).map(..).chain(..)` reads left to right and is equivalent to
//! applying each operator in turn. Every method returns a new [`Cps`]; the
//! receiver is left as it was.

use super::ap::ap;
use super::callbacks::Callbacks;
use super::chain::chain;
use super::error::ScanError;
use super::filter::filter;
use super::function::{Cps, Operator};
use super::map::{map, map_spread};
use super::scan::{scan, scan_seeded};
use super::shared::{Shareable, Value};
use super::transformers::{Chainer, Mapper, Predicate, Reducer, SpreadMapper, Transform};

/// Wraps a closure as a [`Cps`] function.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Recorder, cps, mapper};
///
/// let doubled = cps(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[42]);
/// })
/// .map([Some(mapper(|values: &[i32]| values[0] * 2))]);
///
/// let recorder = Recorder::new(1);
/// doubled.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![84]]);
/// ```
pub fn cps<V, R, F>(body: F) -> Cps<V, R>
where
    V: 'static,
    R: 'static,
    F: Fn(&Callbacks<V>) -> R + Shareable + 'static,
{
    Cps::new(body)
}

impl<V: Value, R: 'static> Cps<V, R> {
    /// Method form of [`map`](super::map()).
    #[must_use]
    pub fn map(&self, mappers: impl IntoIterator<Item = Option<Mapper<V>>>) -> Self {
        map(mappers).apply(self)
    }

    /// Method form of [`map_spread`](super::map_spread()).
    #[must_use]
    pub fn map_spread(&self, mappers: impl IntoIterator<Item = Option<SpreadMapper<V>>>) -> Self {
        map_spread(mappers).apply(self)
    }

    /// Method form of [`chain`](super::chain()).
    #[must_use]
    pub fn chain(&self, chainers: impl IntoIterator<Item = Option<Chainer<V>>>) -> Self {
        chain(chainers).apply(self)
    }

    /// Method form of [`filter`](super::filter()).
    #[must_use]
    pub fn filter(&self, predicates: impl IntoIterator<Item = Option<Predicate<V>>>) -> Self {
        filter(predicates).apply(self)
    }

    /// Method form of [`scan`](super::scan()).
    ///
    /// # Errors
    ///
    /// Fails like [`scan`](super::scan()) when no reducer or no seed is given.
    pub fn scan(
        &self,
        reducers: impl IntoIterator<Item = Option<Reducer<V>>>,
        seed: Option<V>,
    ) -> Result<Self, ScanError> {
        Ok(scan(reducers, seed)?.apply(self))
    }

    /// Method form of [`scan_seeded`](super::scan_seeded()).
    #[must_use]
    pub fn scan_seeded(
        &self,
        seeds: impl IntoIterator<Item = Option<V>>,
        reducers: impl IntoIterator<Item = Option<Reducer<V>>>,
    ) -> Self
    where
        V: Default,
    {
        scan_seeded(seeds, reducers).apply(self)
    }

    /// Method form of [`ap`](super::ap()).
    #[must_use]
    pub fn ap(&self, producers: impl IntoIterator<Item = Option<Cps<Transform<V>>>>) -> Self {
        ap(producers).apply(self)
    }
}
