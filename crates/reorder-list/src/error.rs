#![forbid(unsafe_code)]

//! Error types.
//!
//! Nothing here is fatal to the process. [`ReorderError`] either rejects an
//! explicit request up front or describes why a live session was aborted;
//! in both cases the session ends up `Idle`.

use std::fmt;

/// Reorder session failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// An index outside `[0, row_count)` was supplied to an explicit begin.
    InvalidIndex { index: usize, row_count: usize },
    /// A drag was requested on a list with no rows.
    EmptyList,
    /// The row count changed while dragging. The host broke the contract
    /// that the list is not mutated during a drag, so the session aborts.
    ConcurrentMutation { expected: usize, actual: usize },
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, row_count } => {
                write!(f, "row index {index} out of range (row_count={row_count})")
            }
            Self::EmptyList => write!(f, "cannot drag in an empty list"),
            Self::ConcurrentMutation { expected, actual } => write!(
                f,
                "row count changed during drag (expected {expected}, found {actual})"
            ),
        }
    }
}

impl std::error::Error for ReorderError {}

/// Configuration validation and loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// A field holds a value outside its accepted range.
    Invalid { field: &'static str, reason: String },
    /// File system error while reading a config file.
    #[cfg(feature = "config-files")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    Json(serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
            #[cfg(feature = "config-files")]
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "config TOML parse error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Json(e) => write!(f, "config JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid { .. } => None,
            #[cfg(feature = "config-files")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Json(e) => Some(e),
        }
    }
}
