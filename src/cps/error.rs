//! Error types for combinator construction.

/// Represents an invalid argument list given to [`scan`](super::scan()).
///
/// # Examples
///
/// ```rust
/// use cpskit::cps::ScanError;
///
/// assert_eq!(
///     format!("{}", ScanError::MissingSeed),
///     "scan requires a seed value"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The reducer tuple has no reducer in any slot.
    MissingReducer,
    /// No seed was supplied.
    MissingSeed,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingReducer => write!(formatter, "scan requires at least one reducer"),
            Self::MissingSeed => write!(formatter, "scan requires a seed value"),
        }
    }
}

impl std::error::Error for ScanError {}
