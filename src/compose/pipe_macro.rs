//! The `pipeline!` and `pipe!` macros for left-to-right function application.
//!
//! `pipeline!` applies a chain of functions to values immediately, while
//! `pipe!` builds a closure that does so once it receives its arguments.

/// Applies a chain of functions to a tuple of values, left to right.
///
/// `pipeline!(v1, v2 => f1, f2, f3)` is equivalent to `f3(f2(f1(v1, v2)))`.
///
/// The first function receives every value; each following function is
/// unary and receives the result of the previous step. Evaluation is
/// eager and strictly left to right.
///
/// # Syntax
///
/// - `pipeline!(x => f)` - Returns `f(x)`
/// - `pipeline!(x, y => f)` - Returns `f(x, y)`
/// - `pipeline!(x, y => f, g, h)` - Returns `h(g(f(x, y)))`
/// - `pipeline!(=> f)` - Returns `f()`
///
/// # Examples
///
/// ```
/// use cpskit::pipeline;
///
/// let result = pipeline!(1, 3 => |x: i32, y: i32| x + y, |z: i32| z * 2);
/// assert_eq!(result, 8);
/// ```
///
/// ```
/// use cpskit::pipeline;
///
/// fn to_string(x: i32) -> String { x.to_string() }
/// fn get_length(s: String) -> usize { s.len() }
///
/// assert_eq!(pipeline!(12345 => to_string, get_length), 5);
/// ```
#[macro_export]
macro_rules! pipeline {
    (@apply $value:expr $(,)?) => {
        $value
    };

    (@apply $value:expr, $function:expr $(, $remaining_functions:expr)* $(,)?) => {
        $crate::pipeline!(@apply $function($value) $(, $remaining_functions)*)
    };

    ($($value:expr),* => $function:expr $(, $remaining_functions:expr)* $(,)?) => {
        $crate::pipeline!(@apply $function($($value),*) $(, $remaining_functions)*)
    };
}

/// Builds a closure that pipes its arguments through functions left to right.
///
/// `pipe!(f, g, h)(x)` is equivalent to `pipeline!(x => f, g, h)`.
///
/// Without an argument list the closure is unary. A parenthesised list of
/// names in front of `=>` gives the closure that arity; all arguments are
/// passed to the first function.
///
/// # Examples
///
/// ```
/// use cpskit::pipe;
///
/// let add_then_halve = pipe!(|x: i32| x + 1, |y: i32| y - 2);
/// assert_eq!(add_then_halve(2), 1);
/// ```
///
/// ```
/// use cpskit::pipe;
///
/// let sum_then_double = pipe!((x, y) => |a: i32, b: i32| a + b, |z: i32| z * 2);
/// assert_eq!(sum_then_double(1, 3), 8);
/// ```
#[macro_export]
macro_rules! pipe {
    (($($argument:ident),* $(,)?) => $function:expr $(, $remaining_functions:expr)* $(,)?) => {
        move |$($argument),*| $crate::pipeline!($($argument),* => $function $(, $remaining_functions)*)
    };

    ($function:expr $(, $remaining_functions:expr)* $(,)?) => {
        move |value| $crate::pipeline!(value => $function $(, $remaining_functions)*)
    };
}
