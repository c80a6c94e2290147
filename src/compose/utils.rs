//! Helper functions for positional sequences.
//!
//! - [`merge_array`]: overlays a shorter sequence on a longer one

/// Merges two sequences position by position.
///
/// The result has length `max(primary.len(), secondary.len())`. Positions
/// below `primary.len()` take the value from `primary`; the remaining
/// positions take the value at the same index from `secondary`. A length
/// mismatch in either direction is not an error.
///
/// This is the pass-through rule used by every combinator: relays built for
/// the first positions replace the original callbacks, everything after
/// them is kept as it was.
///
/// # Examples
///
/// ```
/// use cpskit::compose::merge_array;
///
/// assert_eq!(merge_array(&[1, 2], &[3, 4, 5]), vec![1, 2, 5]);
/// assert_eq!(merge_array(&[1, 3], &[2]), vec![1, 3]);
/// assert_eq!(merge_array::<i32>(&[], &[1, 2]), vec![1, 2]);
/// ```
pub fn merge_array<T: Clone>(primary: &[T], secondary: &[T]) -> Vec<T> {
    primary
        .iter()
        .chain(secondary.iter().skip(primary.len()))
        .cloned()
        .collect()
}
