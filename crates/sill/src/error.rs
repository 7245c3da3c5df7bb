//! Context-level error type.

use std::error::Error;
use std::fmt;

use sill_arena::ArenaError;
use sill_core::UsageError;

/// Errors from context lifecycle operations.
///
/// Wraps the two failure families that can reach the caller through the
/// context: API misuse and arena/backing failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextError {
    /// The caller misused the context API.
    Usage(UsageError),
    /// The frame arena (or its backing allocator) failed.
    Arena(ArenaError),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(e) => write!(f, "{e}"),
            Self::Arena(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage(e) => Some(e),
            Self::Arena(e) => Some(e),
        }
    }
}

impl From<UsageError> for ContextError {
    fn from(e: UsageError) -> Self {
        Self::Usage(e)
    }
}

impl From<ArenaError> for ContextError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
