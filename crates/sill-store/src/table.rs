//! The typed external-handle table.
//!
//! One entry per externally-visible handle, each naming the kind and
//! backing-pool index of the object it refers to. The raw handle value is
//! `entry index + 1`; freed entries return to the entry pool and their
//! indices (and therefore handle values) are reused deterministically.

use sill_core::{ObjectHandle, ObjectKind, UsageError};

use crate::kinds::{FramebufferFormat, GlContext, PendingGlContext, PendingWindow, Window};
use crate::pool::SlotPool;

/// One table slot.
#[derive(Clone, Copy, Debug, Default)]
struct TableEntry {
    /// The object this slot refers to, or `None` for a vacant slot.
    occupant: Option<(ObjectKind, u32)>,
    /// Caller-owned opaque word. Independent of the occupant and preserved
    /// across [`ObjectTable::reallocate`].
    user_data: usize,
}

/// Maps opaque external handles to typed records in per-kind pools.
///
/// A dereference under the wrong kind is a [`UsageError::WrongKind`], never
/// a reinterpretation — the kind match selects the pool, so a record can
/// only ever be read as the type it was allocated as.
#[derive(Debug, Default)]
pub struct ObjectTable {
    entries: SlotPool<TableEntry>,
    pending_windows: SlotPool<PendingWindow>,
    windows: SlotPool<Window>,
    pending_gl_contexts: SlotPool<PendingGlContext>,
    gl_contexts: SlotPool<GlContext>,
    framebuffer_formats: SlotPool<FramebufferFormat>,
}

impl ObjectTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a default-constructed object of `kind` and return its
    /// handle.
    ///
    /// The entry's user data starts at zero.
    pub fn allocate(&mut self, kind: ObjectKind) -> ObjectHandle {
        let backing = self.alloc_backing(kind);
        let index = self.entries.alloc(TableEntry {
            occupant: Some((kind, backing)),
            user_data: 0,
        });
        ObjectHandle::from_index(index)
    }

    /// Change an object's kind in place.
    ///
    /// Frees the backing record under the old kind, allocates a fresh
    /// default record under `new_kind`, and leaves the handle and user
    /// data untouched. This is how an object under construction becomes a
    /// realized one at the same handle.
    pub fn reallocate(
        &mut self,
        handle: ObjectHandle,
        new_kind: ObjectKind,
    ) -> Result<(), UsageError> {
        let (old_kind, old_index) = self.occupant(handle)?;
        self.free_backing(old_kind, old_index);
        let backing = self.alloc_backing(new_kind);
        if let Some(entry) = self.entries.get_mut(handle.index()) {
            entry.occupant = Some((new_kind, backing));
        }
        Ok(())
    }

    /// Free an object and its table slot.
    ///
    /// The slot's handle value will be reused by a later
    /// [`ObjectTable::allocate`].
    pub fn free(&mut self, handle: ObjectHandle) -> Result<(), UsageError> {
        let (kind, index) = self.occupant(handle)?;
        self.free_backing(kind, index);
        if let Some(entry) = self.entries.get_mut(handle.index()) {
            *entry = TableEntry::default();
        }
        self.entries.free(handle.index());
        Ok(())
    }

    /// The kind currently stored at `handle`.
    pub fn kind_of(&self, handle: ObjectHandle) -> Result<ObjectKind, UsageError> {
        self.occupant(handle).map(|(kind, _)| kind)
    }

    /// The caller-owned user-data word at `handle`.
    pub fn user_data(&self, handle: ObjectHandle) -> Result<usize, UsageError> {
        let entry = self
            .entries
            .get(handle.index())
            .ok_or(UsageError::UnknownHandle { raw: handle.raw() })?;
        if entry.occupant.is_none() {
            return Err(UsageError::VacantHandle { raw: handle.raw() });
        }
        Ok(entry.user_data)
    }

    /// Set the caller-owned user-data word at `handle`.
    pub fn set_user_data(&mut self, handle: ObjectHandle, data: usize) -> Result<(), UsageError> {
        self.occupant(handle)?;
        if let Some(entry) = self.entries.get_mut(handle.index()) {
            entry.user_data = data;
        }
        Ok(())
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.entries.live_count()
    }

    /// Drop every object and all pool storage. The table stays valid and
    /// empty; previously issued handles become unknown or vacant.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending_windows.clear();
        self.windows.clear();
        self.pending_gl_contexts.clear();
        self.gl_contexts.clear();
        self.framebuffer_formats.clear();
    }

    /// Dereference `handle` as a pending window.
    pub fn pending_window(&self, handle: ObjectHandle) -> Result<&PendingWindow, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::PendingWindow)?;
        Ok(self
            .pending_windows
            .get(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a pending window, mutably.
    pub fn pending_window_mut(
        &mut self,
        handle: ObjectHandle,
    ) -> Result<&mut PendingWindow, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::PendingWindow)?;
        Ok(self
            .pending_windows
            .get_mut(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a realized window.
    pub fn window(&self, handle: ObjectHandle) -> Result<&Window, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::Window)?;
        Ok(self
            .windows
            .get(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a realized window, mutably.
    pub fn window_mut(&mut self, handle: ObjectHandle) -> Result<&mut Window, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::Window)?;
        Ok(self
            .windows
            .get_mut(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a pending GL context.
    pub fn pending_gl_context(
        &self,
        handle: ObjectHandle,
    ) -> Result<&PendingGlContext, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::PendingGlContext)?;
        Ok(self
            .pending_gl_contexts
            .get(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a pending GL context, mutably.
    pub fn pending_gl_context_mut(
        &mut self,
        handle: ObjectHandle,
    ) -> Result<&mut PendingGlContext, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::PendingGlContext)?;
        Ok(self
            .pending_gl_contexts
            .get_mut(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a realized GL context.
    pub fn gl_context(&self, handle: ObjectHandle) -> Result<&GlContext, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::GlContext)?;
        Ok(self
            .gl_contexts
            .get(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a realized GL context, mutably.
    pub fn gl_context_mut(&mut self, handle: ObjectHandle) -> Result<&mut GlContext, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::GlContext)?;
        Ok(self
            .gl_contexts
            .get_mut(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a framebuffer format.
    pub fn framebuffer_format(
        &self,
        handle: ObjectHandle,
    ) -> Result<&FramebufferFormat, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::FramebufferFormat)?;
        Ok(self
            .framebuffer_formats
            .get(index)
            .expect("table occupant index is live in its pool"))
    }

    /// Dereference `handle` as a framebuffer format, mutably.
    pub fn framebuffer_format_mut(
        &mut self,
        handle: ObjectHandle,
    ) -> Result<&mut FramebufferFormat, UsageError> {
        let index = self.expect_kind(handle, ObjectKind::FramebufferFormat)?;
        Ok(self
            .framebuffer_formats
            .get_mut(index)
            .expect("table occupant index is live in its pool"))
    }

    fn occupant(&self, handle: ObjectHandle) -> Result<(ObjectKind, u32), UsageError> {
        let entry = self
            .entries
            .get(handle.index())
            .ok_or(UsageError::UnknownHandle { raw: handle.raw() })?;
        entry.occupant.ok_or(UsageError::VacantHandle {
            raw: handle.raw(),
        })
    }

    fn expect_kind(
        &self,
        handle: ObjectHandle,
        expected: ObjectKind,
    ) -> Result<u32, UsageError> {
        let (actual, index) = self.occupant(handle)?;
        if actual != expected {
            return Err(UsageError::WrongKind { expected, actual });
        }
        Ok(index)
    }

    fn alloc_backing(&mut self, kind: ObjectKind) -> u32 {
        match kind {
            ObjectKind::PendingWindow => self.pending_windows.alloc(PendingWindow::default()),
            ObjectKind::Window => self.windows.alloc(Window::default()),
            ObjectKind::PendingGlContext => {
                self.pending_gl_contexts.alloc(PendingGlContext::default())
            }
            ObjectKind::GlContext => self.gl_contexts.alloc(GlContext::default()),
            ObjectKind::FramebufferFormat => {
                self.framebuffer_formats.alloc(FramebufferFormat::default())
            }
        }
    }

    fn free_backing(&mut self, kind: ObjectKind, index: u32) {
        match kind {
            ObjectKind::PendingWindow => self.pending_windows.free(index),
            ObjectKind::Window => self.windows.free(index),
            ObjectKind::PendingGlContext => self.pending_gl_contexts.free(index),
            ObjectKind::GlContext => self.gl_contexts.free(index),
            ObjectKind::FramebufferFormat => self.framebuffer_formats.free(index),
        }
    }
}
