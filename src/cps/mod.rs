//! Combinators for continuation-passing-style functions.
//!
//! A CPS function does not return its result. It is handed a tuple of
//! callbacks and delivers output tuples by calling them, as often as it
//! likes and on whichever index it likes. This module provides the function
//! value itself ([`Cps`]), the callback tuple ([`Callbacks`]) and operators
//! that transform or combine CPS functions while keeping that calling
//! convention:
//!
//! - [`chain`](fn@chain): feed each output into a CPS-producing function
//! - [`map`](fn@map) / [`map_spread`](fn@map_spread): transform outputs
//! - [`filter`](fn@filter): drop outputs
//! - [`scan`](fn@scan) / [`scan_seeded`](fn@scan_seeded): running accumulators
//! - [`ap`](fn@ap) / [`lift2`](fn@lift2): join outputs with independently delivered functions
//!
//! # Index alignment
//!
//! Operators take a tuple of optional transformers. Slot `i` governs the
//! emissions on callback `i` and nothing else. An empty slot, or an index
//! past the end of the tuple, passes emissions through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use cpskit::cps::{Callbacks, Cps, Operator, Recorder, map, mapper};
//!
//! // Emits on the success callback and then on the error callback.
//! let source: Cps<i32> = Cps::new(|callbacks: &Callbacks<i32>| {
//!     callbacks.emit(0, &[42]);
//!     callbacks.emit(1, &[-1]);
//! });
//!
//! let halved = map([Some(mapper(|values: &[i32]| values[0] / 2))]).apply(&source);
//!
//! let recorder = Recorder::new(2);
//! halved.run(&recorder.callbacks());
//! assert_eq!(recorder.values_at(0), vec![vec![21]]);
//! assert_eq!(recorder.values_at(1), vec![vec![-1]]);
//! ```
//!
//! # Thread safety
//!
//! By default closures are stored behind `Rc` and nothing is `Send`. With
//! the `arc` feature every closure and value must be `Send + Sync`, the
//! resulting functions are `Send + Sync`, and the `ap` join may be driven
//! from several threads at once.

mod ap;
mod callbacks;
mod chain;
mod error;
mod filter;
mod function;
mod map;
mod metadata;
mod of;
mod record;
mod scan;
mod shared;
mod transformers;
mod wrapper;

pub use ap::{Ap, ap, lift2};
pub use callbacks::{Callback, Callbacks};
pub use chain::{Chain, chain};
pub use error::ScanError;
pub use filter::filter;
pub use function::{Cps, Operator};
pub use map::{map, map_spread};
pub use metadata::Metadata;
pub use of::{empty, of, of_n};
pub use record::{Emission, Recorder, collect_sync};
pub use scan::{Accumulator, Scan, SpreadAccumulator, scan, scan_seeded};
pub use shared::{ReferenceCounter, Shareable, Value};
pub use transformers::{
    Chainer, Mapper, Predicate, Reducer, SpreadMapper, SpreadReducer, Transform, Transformers,
    chainer, mapper, predicate, reducer, spread_mapper, spread_reducer, transform,
};
pub use wrapper::cps;
