//! Arena configuration parameters.

/// Configuration for the frame arena.
///
/// Validated at [`FrameArena::new`](crate::FrameArena::new); all values are
/// immutable after creation.
#[derive(Clone, Copy, Debug)]
pub struct ArenaConfig {
    /// Granularity of block sizing in bytes.
    ///
    /// Every block's capacity is a multiple of this. Must be a power of two
    /// and at least 64. Default: 4096.
    pub block_size: u32,

    /// Capacity of the block acquired at construction, in bytes.
    ///
    /// Rounded up to the next `block_size` multiple. Zero means the arena
    /// starts with no blocks and acquires its first on demand.
    /// Default: 65536.
    pub initial_capacity: u32,
}

impl ArenaConfig {
    /// Default block granularity: one 4 KiB page.
    pub const DEFAULT_BLOCK_SIZE: u32 = 4096;

    /// Default initial capacity: 64 KiB.
    pub const DEFAULT_INITIAL_CAPACITY: u32 = 65536;

    /// Smallest accepted `block_size`.
    pub const MIN_BLOCK_SIZE: u32 = 64;

    /// Create a config with the default sizing.
    pub fn new() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Create a config with an explicit block granularity and no initial
    /// block.
    pub fn with_block_size(block_size: u32) -> Self {
        Self {
            block_size,
            initial_capacity: 0,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
