//! Typed auxiliary state carried alongside a CPS function.
//!
//! Every combinator copies the metadata of its source onto the function it
//! produces, so capabilities attached early survive any number of
//! `map`/`chain`/`filter`/`scan`/`ap` steps.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;

use super::shared::{ReferenceCounter, Shareable, SharedAny};

/// A persistent record of typed entries, at most one per type.
///
/// Adding an entry returns a new record and leaves the original untouched;
/// clones share their entries.
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::Metadata;
///
/// #[derive(Debug, PartialEq)]
/// struct Label(&'static str);
///
/// let empty = Metadata::new();
/// let labelled = empty.with(Label("source"));
///
/// assert_eq!(labelled.get::<Label>(), Some(&Label("source")));
/// assert!(empty.get::<Label>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Metadata {
    entries: ReferenceCounter<BTreeMap<TypeId, SharedAny>>,
}

impl Metadata {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry of type `T`, if present.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| (**entry).downcast_ref::<T>())
    }

    /// Returns `true` if an entry of type `T` is present.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Returns a new record with `value` stored, replacing any entry of the same type.
    #[must_use]
    pub fn with<T: Any + Shareable>(&self, value: T) -> Self {
        let mut entries = (*self.entries).clone();
        let entry: SharedAny = ReferenceCounter::new(value);
        entries.insert(TypeId::of::<T>(), entry);
        Self {
            entries: ReferenceCounter::new(entries),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Metadata {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Metadata")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Weight(u32);

    #[derive(Debug, PartialEq)]
    struct Name(String);

    #[rstest]
    fn test_with_does_not_touch_original() {
        let original = Metadata::new().with(Weight(1));
        let updated = original.with(Weight(2)).with(Name("n".to_string()));

        assert_eq!(original.get::<Weight>(), Some(&Weight(1)));
        assert!(!original.contains::<Name>());
        assert_eq!(original.len(), 1);

        assert_eq!(updated.get::<Weight>(), Some(&Weight(2)));
        assert_eq!(updated.get::<Name>(), Some(&Name("n".to_string())));
        assert_eq!(updated.len(), 2);
    }

    #[rstest]
    fn test_empty_record() {
        let metadata = Metadata::new();
        assert!(metadata.is_empty());
        assert!(metadata.get::<Weight>().is_none());
    }
}
