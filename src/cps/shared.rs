//! Pointer, cell and marker types that switch with the `arc` feature.
//!
//! Without `arc` every shared closure lives behind an [`Rc`](std::rc::Rc)
//! and mutable state behind a [`RefCell`](std::cell::RefCell). With `arc`
//! they become [`Arc`](std::sync::Arc) and `parking_lot::Mutex`, and every
//! stored closure and value must be `Send + Sync`.
//!
//! Library code never invokes a callback while a [`SharedCell`] is borrowed,
//! so re-entrant emission cannot hit a borrow panic or a self-deadlock.

use std::any::Any;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

/// Bound required of everything the library stores in shared closures.
///
/// Equivalent to `Send + Sync` with the `arc` feature and to no bound at all
/// otherwise. Implemented for every type that qualifies.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> Shareable for T {}

/// Bound required of everything the library stores in shared closures.
///
/// Equivalent to `Send + Sync` with the `arc` feature and to no bound at all
/// otherwise. Implemented for every type that qualifies.
#[cfg(not(feature = "arc"))]
pub trait Shareable {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> Shareable for T {}

/// Values that can travel through CPS functions.
///
/// Output tuples are cached by `ap`, re-emitted by `filter` and folded by
/// `scan`, so values must be clonable and storable in shared closures.
pub trait Value: Clone + Shareable + 'static {}

impl<T: Clone + Shareable + 'static> Value for T {}

/// Declares a shared `dyn Fn` pointer alias for both pointer flavours.
macro_rules! shared_fn {
    (
        $(#[$meta:meta])*
        $visibility:vis type $name:ident<$($parameter:ident),*> = Fn($($argument:ty),*) $(-> $output:ty)?;
    ) => {
        $(#[$meta])*
        #[cfg(feature = "arc")]
        $visibility type $name<$($parameter),*> =
            std::sync::Arc<dyn Fn($($argument),*) $(-> $output)? + Send + Sync>;

        $(#[$meta])*
        #[cfg(not(feature = "arc"))]
        $visibility type $name<$($parameter),*> = std::rc::Rc<dyn Fn($($argument),*) $(-> $output)?>;
    };
}

pub(crate) use shared_fn;

#[cfg(feature = "arc")]
pub(crate) type SharedAny = std::sync::Arc<dyn Any + Send + Sync>;

#[cfg(not(feature = "arc"))]
pub(crate) type SharedAny = std::rc::Rc<dyn Any>;

/// Interior-mutable slot: `RefCell` by default, `parking_lot::Mutex` with `arc`.
pub(crate) struct SharedCell<T> {
    #[cfg(feature = "arc")]
    inner: parking_lot::Mutex<T>,
    #[cfg(not(feature = "arc"))]
    inner: std::cell::RefCell<T>,
}

impl<T> SharedCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            #[cfg(feature = "arc")]
            inner: parking_lot::Mutex::new(value),
            #[cfg(not(feature = "arc"))]
            inner: std::cell::RefCell::new(value),
        }
    }

    /// Runs `function` with exclusive access to the contents.
    ///
    /// `function` must not emit to callbacks or touch this cell again.
    /// Accumulator reducers are the one kind of user code run here.
    #[cfg(feature = "arc")]
    pub(crate) fn with<U>(&self, function: impl FnOnce(&mut T) -> U) -> U {
        function(&mut self.inner.lock())
    }

    /// Runs `function` with exclusive access to the contents.
    ///
    /// `function` must not emit to callbacks or touch this cell again.
    /// Accumulator reducers are the one kind of user code run here.
    #[cfg(not(feature = "arc"))]
    pub(crate) fn with<U>(&self, function: impl FnOnce(&mut T) -> U) -> U {
        function(&mut self.inner.borrow_mut())
    }
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($argument:tt)*) => {
        tracing::trace!($($argument)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($argument:tt)*) => {};
}

pub(crate) use trace_event;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_shared_cell_with_returns_result() {
        let cell = SharedCell::new(vec![1, 2]);
        let length = cell.with(|values| {
            values.push(3);
            values.len()
        });
        assert_eq!(length, 3);
        assert_eq!(cell.with(|values| values.clone()), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_shared_cell_sequential_access() {
        let cell = SharedCell::new(0);
        for _ in 0..5 {
            cell.with(|count| *count += 1);
        }
        assert_eq!(cell.with(|count| *count), 5);
    }
}
