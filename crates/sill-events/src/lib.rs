//! Tagged event records and the double-buffered per-frame event queue.
//!
//! Backend callbacks append events into the back buffer while a frame
//! runs; at the frame boundary the two buffers swap roles in O(1) and last
//! frame's events become the read-only front buffer. Between two boundary
//! calls the front buffer is frozen: its count and contents never change,
//! so indices handed to the application stay valid for the whole frame.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod event;
pub mod queue;

pub use event::{Event, EventPayload, Key, MouseButtons};
pub use queue::EventQueue;
