//! Context configuration.

use sill_arena::ArenaConfig;

/// Configuration for a [`Context`](crate::Context).
#[derive(Clone, Copy, Debug)]
pub struct ContextConfig {
    /// Sizing for the per-frame scratch arena.
    pub arena: ArenaConfig,

    /// Bytes of arena backing memory each frame boundary retains.
    ///
    /// The boundary resets the scratch arena with this keep budget, so
    /// steady-state frames reuse cached blocks instead of round-tripping
    /// through the backing allocator. Default: 64 KiB.
    pub frame_retain_bytes: usize,
}

impl ContextConfig {
    /// Default frame retention budget.
    pub const DEFAULT_FRAME_RETAIN_BYTES: usize = 65536;

    /// Create a config with default sizing.
    pub fn new() -> Self {
        Self {
            arena: ArenaConfig::new(),
            frame_retain_bytes: Self::DEFAULT_FRAME_RETAIN_BYTES,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new()
    }
}
