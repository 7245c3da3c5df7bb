//! Slot pools and the typed object-handle table for Sill.
//!
//! Every internal resource of the windowing substrate — windows, GL
//! contexts, framebuffer formats — lives in a fixed-element-size
//! [`SlotPool`] at a stable `u32` index. The [`ObjectTable`] sits on top:
//! one pool of table entries maps each external handle to `(kind, index)`
//! in the kind's backing pool, and supports changing an object's kind in
//! place without changing its handle.
//!
//! # Identity continuity
//!
//! The whole point of the table indirection is that a handle survives the
//! "under construction → realized" transition: [`ObjectTable::reallocate`]
//! swaps the backing record while the handle and the caller's user-data
//! word stay put.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kinds;
pub mod pool;
pub mod table;

pub use kinds::{FramebufferFormat, GlContext, PendingGlContext, PendingWindow, Window};
pub use pool::SlotPool;
pub use table::ObjectTable;
