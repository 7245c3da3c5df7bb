//! Stack-discipline frame arena for Sill's per-frame scratch memory.
//!
//! The arena serves many short-lived allocations from large backing blocks
//! and reclaims them in bulk at the frame boundary.
//!
//! # Architecture
//!
//! ```text
//! FrameArena
//! ├── live stack   → Block[] (top = only block allocated from)
//! ├── empty stack  → Block[] (quick-reuse cache, refilled by reset)
//! ├── top_used     → bump cursor into the top live block
//! └── BackingAlloc → block acquisition/release capability
//! ```
//!
//! Allocations are located by [`ArenaSpan`] — a `(block, offset, len)`
//! triple valid until the next [`FrameArena::reset`]. The cursor only ever
//! moves within the top block, so no allocation straddles blocks.
//!
//! # Stack discipline
//!
//! [`FrameArena::free`] and a growing [`FrameArena::realloc`] reclaim space
//! only when the span is exactly the most recent allocation. Freeing out of
//! LIFO order is a silent no-op: the bytes stay unreachable until the next
//! reset. This is the contract, not a defect — callers that want
//! reclamation free in reverse allocation order, everyone else leans on the
//! per-frame reset.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod error;
pub mod span;

pub use arena::FrameArena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use span::ArenaSpan;
