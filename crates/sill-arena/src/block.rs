//! Arena block descriptors.

/// One contiguous backing block.
///
/// Blocks live on either the arena's live stack or its empty stack and
/// migrate between them by move — there are no block pointers anywhere, so
/// the partial-reset path cannot dangle. The buffer comes from the backing
/// allocator and its capacity is always a multiple of the configured
/// `block_size`.
#[derive(Debug)]
pub struct Block {
    /// Backing storage, acquired at full capacity.
    pub(crate) data: Vec<u8>,
    /// Bytes allocated out of this block.
    ///
    /// Authoritative only for buried live blocks; the top block's cursor is
    /// `FrameArena::top_used` and is flushed here when the block is buried.
    pub(crate) used: u32,
}

impl Block {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        Self { data, used: 0 }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> u32 {
        self.data.len() as u32
    }

    /// Size class for the reset bucket sort: capacity in `block_size`
    /// multiples, minus one. Classes at or above the bucket count are
    /// oversized.
    pub(crate) fn size_class(&self, block_size: u32) -> u32 {
        self.capacity() / block_size - 1
    }
}
