//! # cpskit
//!
//! Combinators for continuation-passing-style (CPS) functions with several
//! callbacks.
//!
//! ## Overview
//!
//! A CPS function receives a tuple of callbacks instead of returning a
//! value, and may call any of them any number of times. This library
//! provides:
//!
//! - **Composition**: `pipeline!`, `pipe!` and `merge_array`
//! - **CPS functions**: the `Cps` value, `of`/`of_n`, and the operators
//!   `chain`, `map`, `map_spread`, `filter`, `scan` and `ap`
//! - **Testing helpers**: `Recorder` and `collect_sync`
//!
//! ## Feature Flags
//!
//! - `compose`: Function composition utilities (default)
//! - `cps`: CPS combinators (default)
//! - `arc`: Thread-safe closures and state (`Arc`, `parking_lot::Mutex`)
//! - `serde`: Serialization of recorded emissions
//! - `tracing`: Trace events from `ap` and `scan`
//! - `full`: Enable all features except `arc`
//!
//! ## Example
//!
//! ```rust
//! use cpskit::prelude::*;
//!
//! let answer = cps(|callbacks: &Callbacks<i32>| {
//!     callbacks.emit(0, &[21]);
//! })
//! .map([Some(mapper(|values: &[i32]| values[0] * 2))]);
//!
//! assert_eq!(collect_sync(&answer), vec![vec![42]]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use cpskit::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "cps")]
    pub use crate::cps::*;
}

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "cps")]
pub mod cps;
