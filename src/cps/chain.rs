//! `chain`: rewire each callback through a CPS-producing function.
//!
//! For every non-empty slot `i`, emissions on callback `i` of the source are
//! fed to the chainer, and the CPS function it returns is run with the
//! *whole* callback tuple, so it may emit on any index. Every other index is
//! passed through untouched. `map`, `filter` and `scan` are all built on
//! this operator.

use super::callbacks::{Callback, Callbacks};
use super::function::{Cps, Operator};
use super::shared::{ReferenceCounter, Value};
use super::transformers::{Chainer, Transformers};

/// Operator returned by [`chain`], [`map`](super::map()), [`map_spread`](super::map_spread())
/// and [`filter`](super::filter()).
pub struct Chain<V> {
    chainers: Transformers<Chainer<V>>,
}

/// Builds the `chain` operator from a tuple of optional chainers.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Callbacks, Cps, Operator, Recorder, chain, chainer, of};
///
/// let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
///     callbacks.emit(0, &[42]);
/// });
/// let doubled = chain([Some(chainer(|values: &[i32]| of([values[0] * 2])))]).apply(&source);
///
/// let recorder = Recorder::new(1);
/// doubled.run(&recorder.callbacks());
/// assert_eq!(recorder.values_at(0), vec![vec![84]]);
/// ```
pub fn chain<V, I>(chainers: I) -> Chain<V>
where
    I: IntoIterator<Item = Option<Chainer<V>>>,
{
    Chain {
        chainers: chainers.into_iter().collect(),
    }
}

impl<V> Chain<V> {
    /// Returns the chainer tuple.
    pub const fn chainers(&self) -> &Transformers<Chainer<V>> {
        &self.chainers
    }
}

impl<V: Value> Operator<V> for Chain<V> {
    fn apply<R: 'static>(&self, source: &Cps<V, R>) -> Cps<V, R> {
        let chainers = self.chainers.clone();
        let inner = source.clone();
        source.derive(move |callbacks: &Callbacks<V>| {
            let relays: Vec<Option<Callback<V>>> = chainers
                .iter()
                .enumerate()
                .map(|(index, slot)| match slot {
                    Some(chainer) => Some(relay(chainer, callbacks)),
                    None => callbacks.get(index).cloned(),
                })
                .collect();
            inner.run(&callbacks.merge_relays(&relays))
        })
    }
}

impl<V> Clone for Chain<V> {
    fn clone(&self) -> Self {
        Self {
            chainers: self.chainers.clone(),
        }
    }
}

impl<V> std::fmt::Debug for Chain<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Chain")
            .field("chainers", &self.chainers)
            .finish()
    }
}

fn relay<V: Value>(chainer: &Chainer<V>, callbacks: &Callbacks<V>) -> Callback<V> {
    let chainer = ReferenceCounter::clone(chainer);
    let callbacks = callbacks.clone();
    ReferenceCounter::new(move |values: &[V]| chainer(values).run(&callbacks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cps::{Recorder, chainer, empty, of, of_n};
    use rstest::rstest;

    fn emit_twice() -> Cps<i32> {
        Cps::new(|callbacks: &Callbacks<i32>| {
            callbacks.emit(0, &[42]);
            callbacks.emit(0, &[42]);
        })
    }

    #[rstest]
    fn test_every_repeated_output_is_transformed() {
        let recorder = Recorder::new(1);
        chain([Some(chainer(|values: &[i32]| of([values[0] + 1])))])
            .apply(&emit_twice())
            .run(&recorder.callbacks());
        assert_eq!(recorder.values_at(0), vec![vec![43], vec![43]]);
    }

    #[rstest]
    fn test_chainer_may_emit_on_other_index() {
        let recorder = Recorder::new(2);
        chain([Some(chainer(|values: &[i32]| of_n(1, [values[0] - 1])))])
            .apply(&emit_twice())
            .run(&recorder.callbacks());
        assert!(recorder.values_at(0).is_empty());
        assert_eq!(recorder.values_at(1), vec![vec![41], vec![41]]);
    }

    #[rstest]
    fn test_chainer_returning_empty_drops_emission() {
        let recorder = Recorder::new(1);
        chain([Some(chainer(|_: &[i32]| empty()))])
            .apply(&emit_twice())
            .run(&recorder.callbacks());
        assert!(recorder.is_empty());
    }

    #[rstest]
    fn test_empty_chain_is_identity() {
        let recorder = Recorder::new(1);
        chain(Vec::new())
            .apply(&emit_twice())
            .run(&recorder.callbacks());
        assert_eq!(recorder.values_at(0), vec![vec![42], vec![42]]);
    }
}
