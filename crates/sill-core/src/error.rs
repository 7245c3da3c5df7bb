//! Error types shared across the Sill workspace.

use std::error::Error;
use std::fmt;

use crate::kind::ObjectKind;

/// A caller misused the API.
///
/// Usage errors are always detectable locally, before any storage is
/// touched, and are returned as recoverable values so the host application
/// decides policy. Operations that detect one also route it through the
/// configured [`ErrorSink`](crate::report::ErrorSink).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// The reserved raw handle value `0` was passed in.
    NullHandle,
    /// A handle whose index is outside the object table.
    UnknownHandle {
        /// The raw handle value.
        raw: u32,
    },
    /// A handle to a table slot that holds no object (freed, or never
    /// allocated under the current table).
    VacantHandle {
        /// The raw handle value.
        raw: u32,
    },
    /// A typed dereference named a kind the entry does not hold.
    WrongKind {
        /// The kind the caller asked for.
        expected: ObjectKind,
        /// The kind the entry actually holds.
        actual: ObjectKind,
    },
    /// An event index at or beyond the front buffer's length.
    EventIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of events in the front buffer.
        len: usize,
    },
    /// `init` was called on a context that is already initialized.
    AlreadyInitialized,
    /// An operation other than `init`/`deinit` was called on an
    /// uninitialized (or already deinitialized) context.
    NotInitialized,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullHandle => write!(f, "handle 0 is reserved and invalid"),
            Self::UnknownHandle { raw } => {
                write!(f, "handle {raw} is outside the object table")
            }
            Self::VacantHandle { raw } => {
                write!(f, "handle {raw} refers to a vacant table slot")
            }
            Self::WrongKind { expected, actual } => {
                write!(f, "expected a {expected}, found a {actual}")
            }
            Self::EventIndexOutOfRange { index, len } => {
                write!(f, "event index {index} out of range (front buffer holds {len})")
            }
            Self::AlreadyInitialized => write!(f, "context is already initialized"),
            Self::NotInitialized => write!(f, "context is not initialized"),
        }
    }
}

impl Error for UsageError {}
