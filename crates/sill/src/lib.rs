//! Sill: the object and memory substrate of a cross-platform windowing
//! library.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Sill sub-crates. For most users, adding `sill` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sill::prelude::*;
//!
//! let mut ctx = Context::new();
//! ctx.init(ContextConfig::new()).unwrap();
//!
//! // Configure a window, then realize it at the same handle.
//! let win = ctx.create_object(ObjectKind::PendingWindow).unwrap();
//! ctx.objects_mut().unwrap().pending_window_mut(win).unwrap().title = "demo".into();
//! ctx.transition_object(win, ObjectKind::Window).unwrap();
//!
//! // Backend callbacks append events during the frame...
//! ctx.append_event(
//!     EventTimestamp(1),
//!     EventPayload::Focus { window: Some(win) },
//! )
//! .unwrap();
//!
//! // ...and the frame boundary publishes them.
//! ctx.frame_boundary().unwrap();
//! assert_eq!(ctx.events().unwrap().len(), 1);
//! assert_eq!(ctx.event(0).unwrap().current_window, Some(win));
//!
//! ctx.deinit();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sill-core` | Handles, kinds, errors, the error sink, the backing-allocator capability |
//! | [`arena`] | `sill-arena` | The frame arena and its spans |
//! | [`store`] | `sill-store` | Slot pools, the object table, object records |
//! | [`events`] | `sill-events` | Event records and the double-buffered queue |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod context;
mod error;

/// Frame arena and span types (`sill-arena`).
pub use sill_arena as arena;

/// Core handles, kinds, errors, and capabilities (`sill-core`).
pub use sill_core as types;

/// Event records and the double-buffered queue (`sill-events`).
pub use sill_events as events;

/// Slot pools, the object table, and object records (`sill-store`).
pub use sill_store as store;

pub use config::ContextConfig;
pub use context::Context;
pub use error::ContextError;

/// The most commonly used types, re-exported in one place.
pub mod prelude {
    pub use crate::{Context, ContextConfig, ContextError};
    pub use sill_arena::{ArenaConfig, ArenaSpan};
    pub use sill_core::{
        ErrorClass, ErrorSink, EventTimestamp, ObjectHandle, ObjectKind, UsageError,
    };
    pub use sill_events::{Event, EventPayload};
}
