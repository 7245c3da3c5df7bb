//! The backing-allocator capability.
//!
//! The frame arena never reaches for the global allocator directly: block
//! storage is acquired from and released to a [`BackingAlloc`], so the host
//! can substitute its own accounting, quotas, or instrumentation. Blocks
//! are whole zero-initialised `Vec<u8>` buffers; intra-block placement is
//! the arena's own index arithmetic.

use std::error::Error;
use std::fmt;

/// The backing allocator refused a block request.
///
/// Exhaustion is an external-class error: the substrate cannot recover from
/// it, and the triggering allocation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingError {
    /// Number of bytes that were requested.
    pub requested: usize,
}

impl fmt::Display for BackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "backing allocator refused a {}-byte block",
            self.requested
        )
    }
}

impl Error for BackingError {}

/// Capability for acquiring and releasing arena block storage.
pub trait BackingAlloc {
    /// Acquire a zero-initialised block of exactly `bytes` bytes.
    fn acquire(&mut self, bytes: usize) -> Result<Vec<u8>, BackingError>;

    /// Return a block previously handed out by [`BackingAlloc::acquire`].
    ///
    /// Implementations that only account (rather than cache) may simply
    /// drop the buffer.
    fn release(&mut self, block: Vec<u8>);
}

/// The default heap-backed allocator.
///
/// Tracks the number of bytes currently outstanding, which the arena's
/// memory statistics and the exhaustion tests both read.
#[derive(Debug, Default)]
pub struct SystemAlloc {
    outstanding: usize,
}

impl SystemAlloc {
    /// Create a fresh system allocator with nothing outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently acquired and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl BackingAlloc for SystemAlloc {
    fn acquire(&mut self, bytes: usize) -> Result<Vec<u8>, BackingError> {
        self.outstanding += bytes;
        Ok(vec![0u8; bytes])
    }

    fn release(&mut self, block: Vec<u8>) {
        self.outstanding = self.outstanding.saturating_sub(block.len());
    }
}
