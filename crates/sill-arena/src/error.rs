//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The backing allocator refused a block — the host is out of memory.
    ///
    /// This is an external-class failure: the triggering allocation fails
    /// and nothing inside the arena can recover it.
    Exhausted {
        /// Number of bytes the arena asked the backing allocator for.
        requested: usize,
    },
    /// The arena configuration failed validation at construction.
    InvalidConfig {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { requested } => {
                write!(f, "backing allocator exhausted: requested {requested} bytes")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
