//! Left-to-right function application and positional helpers.
//!
//! # Overview
//!
//! - [`pipeline!`]: apply functions to a tuple of values, left to right
//! - [`pipe!`]: build a closure that applies functions left to right
//! - [`merge_array`]: overlay a shorter sequence on a longer one
//!
//! # Examples
//!
//! ## Pipeline
//!
//! ```
//! use cpskit::pipeline;
//!
//! fn add_one(x: i32) -> i32 { x + 1 }
//! fn double(x: i32) -> i32 { x * 2 }
//!
//! // pipeline!(x => f, g) = g(f(x))
//! assert_eq!(pipeline!(5 => double, add_one), 11);
//! ```
//!
//! ## Pipe
//!
//! ```
//! use cpskit::pipe;
//!
//! fn add_one(x: i32) -> i32 { x + 1 }
//! fn double(x: i32) -> i32 { x * 2 }
//!
//! let double_then_add_one = pipe!(double, add_one);
//! assert_eq!(double_then_add_one(5), 11);
//! ```
//!
//! # Laws
//!
//! - **Equivalence**: `pipe!(f, g)(x) == pipeline!(x => f, g)`
//! - **Associativity**: `pipeline!(x => f, g, h) == pipeline!(pipeline!(x => f, g) => h)`

mod pipe_macro;
mod utils;

pub use utils::merge_array;

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::pipe;
pub use crate::pipeline;
