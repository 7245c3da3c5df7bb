//! Span handles locating one frame-lifetime allocation.

use std::fmt;

/// Location of a single arena allocation.
///
/// A span indexes the live block stack, so it stays valid for the rest of
/// the frame it was allocated in (the live stack only grows between
/// resets). It is invalidated by [`FrameArena::reset`](crate::FrameArena::reset)
/// and must not be resolved afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct ArenaSpan {
    /// Index into the live block stack.
    pub(crate) block: u32,
    /// Byte offset within the block, aligned as requested at allocation.
    pub(crate) offset: u32,
    /// Length of the allocation in bytes.
    pub(crate) len: u32,
}

impl ArenaSpan {
    pub(crate) fn new(block: u32, offset: u32, len: u32) -> Self {
        Self { block, offset, len }
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset within its block.
    ///
    /// Alignment requested through
    /// [`alloc_aligned`](crate::FrameArena::alloc_aligned) is relative to
    /// the block base, which is what this offset is measured from.
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl fmt::Display for ArenaSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaSpan(block={}, off={}, len={})",
            self.block, self.offset, self.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_span() {
        let s = ArenaSpan::new(0, 16, 0);
        assert!(s.is_empty());
        assert_eq!(s.offset(), 16);
    }

    #[test]
    fn len_reports_bytes() {
        let s = ArenaSpan::new(2, 64, 128);
        assert_eq!(s.len(), 128);
        assert!(!s.is_empty());
    }
}
