//! The frame arena allocator.

use tracing::{debug, trace};

use sill_core::backing::{BackingAlloc, SystemAlloc};

use crate::block::Block;
use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::span::ArenaSpan;

/// Number of size classes in the reset bucket sort.
const RESET_BUCKETS: usize = 32;

/// Bound on the empty-stack scan in the capacity guarantee. Keeps the
/// guarantee cheap when the empty cache is long; blocks past the bound are
/// simply not considered for reuse this time.
const EMPTY_SCAN_LIMIT: usize = 50;

/// Growable stack-discipline arena over fixed-granularity blocks.
///
/// All allocation happens in the top block of the live stack; when it runs
/// out, the arena promotes a cached empty block or acquires a fresh one
/// from the backing allocator. [`FrameArena::reset`] reclaims the whole
/// frame in bulk, retaining up to a caller-chosen number of bytes of
/// backing memory for the next frame.
pub struct FrameArena<A: BackingAlloc = SystemAlloc> {
    /// Blocks holding this frame's allocations. Top = last.
    live: Vec<Block>,
    /// Reuse cache, refilled by reset. Top = last, ordered so the largest
    /// blocks are scanned first.
    empty: Vec<Block>,
    /// Bump cursor into the top live block. Zero when `live` is empty.
    top_used: u32,
    config: ArenaConfig,
    backing: A,
}

impl FrameArena<SystemAlloc> {
    /// Create an arena backed by the default system allocator.
    pub fn system(config: ArenaConfig) -> Result<Self, ArenaError> {
        Self::new(config, SystemAlloc::new())
    }
}

impl<A: BackingAlloc> FrameArena<A> {
    /// Create a new arena.
    ///
    /// Acquires one block of `config.initial_capacity` bytes (rounded up to
    /// the block granularity) unless that capacity is zero.
    pub fn new(config: ArenaConfig, backing: A) -> Result<Self, ArenaError> {
        if !config.block_size.is_power_of_two()
            || config.block_size < ArenaConfig::MIN_BLOCK_SIZE
        {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "block_size must be a power of two and >= {} (got {})",
                    ArenaConfig::MIN_BLOCK_SIZE,
                    config.block_size,
                ),
            });
        }

        let mut arena = Self {
            live: Vec::new(),
            empty: Vec::new(),
            top_used: 0,
            config,
            backing,
        };
        if config.initial_capacity > 0 {
            arena.guarantee_capacity(config.initial_capacity)?;
        }
        Ok(arena)
    }

    /// Bump-allocate `len` bytes.
    ///
    /// Equivalent to [`FrameArena::alloc_aligned`] with alignment 1. The
    /// only failure is backing-allocator exhaustion.
    pub fn alloc(&mut self, len: u32) -> Result<ArenaSpan, ArenaError> {
        self.alloc_aligned(len, 1)
    }

    /// Bump-allocate `len` bytes whose block offset is a multiple of
    /// `align`.
    ///
    /// Alignment is measured from the block base (spans resolve to slices,
    /// never raw addresses). `align` must be a power of two. The returned
    /// span never straddles blocks.
    pub fn alloc_aligned(&mut self, len: u32, align: u32) -> Result<ArenaSpan, ArenaError> {
        debug_assert!(align.is_power_of_two(), "alignment must be a power of two");

        // Worst case: the cursor needs align - 1 bytes of padding.
        let worst = len.checked_add(align - 1).ok_or(ArenaError::Exhausted {
            requested: len as usize,
        })?;
        self.guarantee_capacity(worst)?;

        let offset = (self.top_used + (align - 1)) & !(align - 1);
        let block = (self.live.len() - 1) as u32;
        self.top_used = offset + len;
        Ok(ArenaSpan::new(block, offset, len))
    }

    /// Resize an allocation.
    ///
    /// Shrinking returns the same location with the tail abandoned (space
    /// above the shrink point is not reclaimed). Growing extends in place
    /// when `span` is the most recent allocation and its block has room;
    /// otherwise the contents move to a fresh allocation and the old bytes
    /// leak until the next reset.
    pub fn realloc(&mut self, span: ArenaSpan, new_len: u32) -> Result<ArenaSpan, ArenaError> {
        if new_len <= span.len {
            return Ok(ArenaSpan::new(span.block, span.offset, new_len));
        }

        if self.is_top_allocation(span) {
            let top_cap = self.live[span.block as usize].capacity();
            if top_cap - span.offset >= new_len {
                self.top_used = span.offset + new_len;
                return Ok(ArenaSpan::new(span.block, span.offset, new_len));
            }
        }

        let new_span = self.alloc(new_len)?;
        let src_block = span.block as usize;
        let dst_block = new_span.block as usize;
        let src = span.offset as usize..(span.offset + span.len) as usize;
        let dst = new_span.offset as usize;
        if src_block == dst_block {
            self.live[src_block].data.copy_within(src, dst);
        } else {
            // The destination is the top block, so it is strictly later in
            // the stack than the source.
            let (head, tail) = self.live.split_at_mut(dst_block);
            tail[0].data[dst..dst + span.len as usize].copy_from_slice(&head[src_block].data[src]);
        }
        Ok(new_span)
    }

    /// Free an allocation.
    ///
    /// Reclaims the space only when `span` is exactly the most recent
    /// allocation (stack discipline); any other span is a silent no-op and
    /// its bytes stay unreachable until the next reset. Callers wanting
    /// reclamation must free in reverse allocation order.
    ///
    /// When LIFO frees unwind a block completely, the block is demoted to
    /// the empty cache and the previous block's cursor is restored, so
    /// reverse-order frees reclaim across block boundaries too.
    pub fn free(&mut self, span: ArenaSpan) {
        if self.is_top_allocation(span) {
            self.top_used = span.offset;
            while self.top_used == 0 && self.live.len() > 1 {
                if let Some(block) = self.live.pop() {
                    self.empty.push(block);
                }
                self.top_used = self.live.last().map_or(0, |b| b.used);
            }
        }
    }

    /// Resolve a span to its bytes.
    ///
    /// # Panics
    ///
    /// Panics if `span` was invalidated by a reset.
    pub fn slice(&self, span: ArenaSpan) -> &[u8] {
        let block = &self.live[span.block as usize];
        &block.data[span.offset as usize..(span.offset + span.len) as usize]
    }

    /// Resolve a span to its bytes, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `span` was invalidated by a reset.
    pub fn slice_mut(&mut self, span: ArenaSpan) -> &mut [u8] {
        let block = &mut self.live[span.block as usize];
        &mut block.data[span.offset as usize..(span.offset + span.len) as usize]
    }

    /// Reclaim the whole frame, retaining about `keep` bytes of backing
    /// memory for reuse.
    ///
    /// Every live block moves to the empty cache and the cursor zeroes, so
    /// no allocation survives. The cache is then redistributed into 32
    /// size classes; walking from the largest class down,
    /// blocks are kept until the accumulated capacity reaches `keep`, and
    /// everything else is released to the backing allocator. Blocks larger
    /// than the largest class are considered only after every bucket, so
    /// the retention bias favors large *reusable* blocks. O(n) in the block
    /// count, O(1) extra memory beyond the fixed bucket array.
    pub fn reset(&mut self, keep: usize) {
        if let Some(top) = self.live.last_mut() {
            top.used = self.top_used;
        }
        self.top_used = 0;
        self.empty.append(&mut self.live);

        let mut buckets: [Vec<Block>; RESET_BUCKETS] = std::array::from_fn(|_| Vec::new());
        let mut oversized: Vec<Block> = Vec::new();
        for mut block in self.empty.drain(..) {
            block.used = 0;
            let class = block.size_class(self.config.block_size) as usize;
            if class < RESET_BUCKETS {
                buckets[class].push(block);
            } else {
                oversized.push(block);
            }
        }

        let mut kept_bytes = 0usize;
        let mut evicted = 0usize;
        let mut retained: Vec<Block> = Vec::new();
        let mut retained_oversized: Vec<Block> = Vec::new();
        for bucket in buckets.iter_mut().rev() {
            for block in bucket.drain(..) {
                if kept_bytes < keep {
                    kept_bytes += block.capacity() as usize;
                    retained.push(block);
                } else {
                    evicted += 1;
                    self.backing.release(block.data);
                }
            }
        }
        for block in oversized {
            if kept_bytes < keep {
                kept_bytes += block.capacity() as usize;
                retained_oversized.push(block);
            } else {
                evicted += 1;
                self.backing.release(block.data);
            }
        }

        // Re-thread largest-first: the guarantee scans from the vec's tail,
        // so ascending order puts the largest blocks first in scan order,
        // with oversized blocks ahead of everything.
        retained.reverse();
        retained.extend(retained_oversized);
        self.empty = retained;

        if evicted > 0 {
            debug!(evicted, kept_bytes, "released arena blocks on reset");
        }
        trace!(keep, cached = self.empty.len(), "arena reset");
    }

    /// Release every block back to the backing allocator unconditionally.
    ///
    /// The arena stays valid and empty afterwards.
    pub fn deinit(&mut self) {
        while let Some(block) = self.live.pop() {
            self.backing.release(block.data);
        }
        while let Some(block) = self.empty.pop() {
            self.backing.release(block.data);
        }
        self.top_used = 0;
    }

    /// Bytes allocated in the current frame (including stack-discipline
    /// leaks, excluding block-tail waste).
    pub fn used(&self) -> usize {
        let buried: usize = match self.live.len() {
            0 => 0,
            n => self.live[..n - 1].iter().map(|b| b.used as usize).sum(),
        };
        buried + self.top_used as usize
    }

    /// Total capacity of the live stack in bytes.
    pub fn capacity(&self) -> usize {
        self.live.iter().map(|b| b.capacity() as usize).sum()
    }

    /// Total bytes held from the backing allocator (live + empty cache).
    pub fn memory_bytes(&self) -> usize {
        self.capacity() + self.empty.iter().map(|b| b.capacity() as usize).sum::<usize>()
    }

    /// Number of blocks on the live stack.
    pub fn live_block_count(&self) -> usize {
        self.live.len()
    }

    /// Number of blocks in the empty cache.
    pub fn empty_block_count(&self) -> usize {
        self.empty.len()
    }

    /// Access the backing allocator (for accounting).
    pub fn backing(&self) -> &A {
        &self.backing
    }

    fn is_top_allocation(&self, span: ArenaSpan) -> bool {
        (span.block as usize) + 1 == self.live.len()
            && span.offset + span.len == self.top_used
    }

    /// Ensure the top live block has at least `cap` free bytes.
    ///
    /// Fast path: the current top suffices. Otherwise a bounded scan of the
    /// empty cache promotes the first block large enough; failing that, a
    /// fresh block of `cap` rounded up to the block granularity is acquired.
    fn guarantee_capacity(&mut self, cap: u32) -> Result<(), ArenaError> {
        if let Some(top) = self.live.last() {
            if top.capacity() - self.top_used >= cap {
                return Ok(());
            }
        }

        let scan = self.empty.len().min(EMPTY_SCAN_LIMIT);
        for back in 1..=scan {
            let idx = self.empty.len() - back;
            if self.empty[idx].capacity() >= cap {
                let block = self.empty.remove(idx);
                self.push_top(block);
                return Ok(());
            }
        }

        let block_size = self.config.block_size as usize;
        let bytes = (cap as usize).max(1).div_ceil(block_size) * block_size;
        let data = self
            .backing
            .acquire(bytes)
            .map_err(|e| ArenaError::Exhausted {
                requested: e.requested,
            })?;
        debug!(bytes, live = self.live.len() + 1, "acquired arena block");
        self.push_top(Block::new(data));
        Ok(())
    }

    /// Make `block` the new top of the live stack, burying the old top.
    fn push_top(&mut self, block: Block) {
        if let Some(top) = self.live.last_mut() {
            top.used = self.top_used;
        }
        self.top_used = 0;
        self.live.push(block);
    }
}

impl<A: BackingAlloc> Drop for FrameArena<A> {
    fn drop(&mut self) {
        self.deinit();
    }
}
