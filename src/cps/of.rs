//! Primitive CPS functions that emit immediately.

use super::callbacks::Callbacks;
use super::function::Cps;
use super::shared::Value;

/// Creates a CPS function that emits `values` once on its first callback.
///
/// No other callback is ever invoked.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Recorder, of};
///
/// let recorder = Recorder::new(2);
/// of([42]).run(&recorder.callbacks());
///
/// assert_eq!(recorder.values_at(0), vec![vec![42]]);
/// assert!(recorder.values_at(1).is_empty());
/// ```
pub fn of<V: Value>(values: impl IntoIterator<Item = V>) -> Cps<V> {
    of_n(0, values)
}

/// Creates a CPS function that emits `values` once on callback `index`.
///
/// Running it with a callback tuple that has no callback at `index` does
/// nothing.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::{Recorder, of_n};
///
/// let recorder = Recorder::new(3);
/// of_n(2, [2, 7]).run(&recorder.callbacks());
///
/// assert_eq!(recorder.values_at(2), vec![vec![2, 7]]);
/// ```
pub fn of_n<V: Value>(index: usize, values: impl IntoIterator<Item = V>) -> Cps<V> {
    let values: Vec<V> = values.into_iter().collect();
    Cps::new(move |callbacks: &Callbacks<V>| {
        callbacks.emit(index, &values);
    })
}

/// Creates a CPS function that never emits.
pub fn empty<V: Value>() -> Cps<V> {
    Cps::new(|_: &Callbacks<V>| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cps::Recorder;
    use rstest::rstest;

    #[rstest]
    fn test_of_multiple_values() {
        let recorder = Recorder::new(1);
        of([2, 7]).run(&recorder.callbacks());
        assert_eq!(recorder.values_at(0), vec![vec![2, 7]]);
    }

    #[rstest]
    fn test_of_never_reaches_second_callback() {
        let recorder = Recorder::new(2);
        of([55]).run(&recorder.callbacks());
        of([3, 2, 1]).run(&recorder.callbacks());
        assert!(recorder.values_at(1).is_empty());
        assert_eq!(recorder.len(), 2);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    fn test_of_n_targets_index(#[case] index: usize) {
        let recorder = Recorder::new(3);
        of_n(index, [42]).run(&recorder.callbacks());
        assert_eq!(recorder.values_at(index), vec![vec![42]]);
        assert_eq!(recorder.len(), 1);
    }

    #[rstest]
    fn test_of_n_absent_callback_is_silent() {
        let recorder = Recorder::new(1);
        of_n(3, [1]).run(&recorder.callbacks());
        assert!(recorder.is_empty());
    }

    #[rstest]
    fn test_of_empty_tuple() {
        let recorder = Recorder::<i32>::new(1);
        of([]).run(&recorder.callbacks());
        assert_eq!(recorder.values_at(0), vec![Vec::<i32>::new()]);
    }

    #[rstest]
    fn test_empty_never_emits() {
        let recorder = Recorder::<i32>::new(2);
        empty().run(&recorder.callbacks());
        assert!(recorder.is_empty());
    }
}
