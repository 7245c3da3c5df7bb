//! The context object owning the whole substrate.

use tracing::{debug, trace};

use sill_arena::{ArenaSpan, FrameArena};
use sill_core::{
    ErrorClass, ErrorSink, EventTimestamp, ObjectHandle, ObjectKind, UsageError,
};
use sill_events::{Event, EventPayload, EventQueue};
use sill_store::{
    FramebufferFormat, GlContext, ObjectTable, PendingGlContext, PendingWindow, Window,
};

use crate::config::ContextConfig;
use crate::error::ContextError;

/// Everything a live context owns.
struct ContextState {
    /// Per-frame scratch arena, reset at every frame boundary.
    scratch: FrameArena,
    /// All pooled objects, addressed by external handle.
    objects: ObjectTable,
    /// The double-buffered event queue.
    events: EventQueue,
    config: ContextConfig,
}

/// The substrate's single owning object.
///
/// Replaces the process-wide state of a classic C windowing library with
/// an explicitly constructed value: one scratch arena, one object table,
/// and one event queue, created by [`Context::init`] and torn down by
/// [`Context::deinit`].
///
/// `deinit` is safe to call at any point — before `init`, twice in a row,
/// mid-frame — and unconditionally frees every live object, all pool
/// storage, and all arena blocks. A fresh `Context` starts uninitialized;
/// every operation other than `init`/`deinit` on an uninitialized context
/// is a [`UsageError::NotInitialized`].
///
/// Usage errors detected by context operations are routed through the
/// configured [`ErrorSink`] before being returned, so a host can centralise
/// logging or abort-on-misuse policy without wrapping every call site.
#[derive(Default)]
pub struct Context {
    state: Option<ContextState>,
    sink: ErrorSink,
}

impl Context {
    /// Create an uninitialized context with a disabled error sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized context with the given error sink.
    pub fn with_sink(sink: ErrorSink) -> Self {
        Self {
            state: None,
            sink,
        }
    }

    /// Replace the error sink.
    pub fn set_sink(&mut self, sink: ErrorSink) {
        self.sink = sink;
    }

    /// Whether `init` has run (and `deinit` has not).
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Initialize the substrate.
    ///
    /// Fails with [`UsageError::AlreadyInitialized`] when called twice
    /// without an intervening [`Context::deinit`], or with an arena error
    /// when the initial block acquisition fails.
    pub fn init(&mut self, config: ContextConfig) -> Result<(), ContextError> {
        if self.state.is_some() {
            let err = UsageError::AlreadyInitialized;
            self.sink.report(ErrorClass::Usage, &err.to_string());
            return Err(err.into());
        }
        let scratch = match FrameArena::system(config.arena) {
            Ok(arena) => arena,
            Err(e) => {
                self.sink.report(ErrorClass::External, &e.to_string());
                return Err(e.into());
            }
        };
        self.state = Some(ContextState {
            scratch,
            objects: ObjectTable::new(),
            events: EventQueue::new(),
            config,
        });
        debug!("context initialized");
        Ok(())
    }

    /// Tear the substrate down.
    ///
    /// Frees all live objects, all pool storage, and all arena blocks
    /// unconditionally. Safe to call at any point, any number of times;
    /// on an uninitialized context it is inert.
    pub fn deinit(&mut self) {
        if self.state.take().is_some() {
            debug!("context deinitialized");
        }
    }

    /// Run the per-frame boundary.
    ///
    /// Swaps the event buffers — last frame's events become the read-only
    /// front buffer — and resets the scratch arena, retaining the
    /// configured number of bytes of backing memory.
    pub fn frame_boundary(&mut self) -> Result<(), UsageError> {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Err(self.report_usage(UsageError::NotInitialized)),
        };
        state.events.frame_boundary();
        let keep = state.config.frame_retain_bytes;
        state.scratch.reset(keep);
        trace!(events = state.events.len(), "frame boundary");
        Ok(())
    }

    // ── handles ──────────────────────────────────────────────

    /// Validate a raw integer handle from the API boundary.
    ///
    /// The reserved value `0` reports and returns
    /// [`UsageError::NullHandle`]. Range and occupancy are checked by the
    /// operation the handle is passed to.
    pub fn handle_from_raw(&self, raw: u32) -> Result<ObjectHandle, UsageError> {
        ObjectHandle::from_raw(raw).ok_or_else(|| self.report_usage(UsageError::NullHandle))
    }

    // ── objects ──────────────────────────────────────────────

    /// Allocate a default-constructed object of `kind`.
    pub fn create_object(&mut self, kind: ObjectKind) -> Result<ObjectHandle, UsageError> {
        match self.state.as_mut() {
            Some(state) => Ok(state.objects.allocate(kind)),
            None => Err(self.report_usage(UsageError::NotInitialized)),
        }
    }

    /// Change an object's kind in place, keeping its handle and user data.
    pub fn transition_object(
        &mut self,
        handle: ObjectHandle,
        new_kind: ObjectKind,
    ) -> Result<(), UsageError> {
        let result = match self.state.as_mut() {
            Some(state) => state.objects.reallocate(handle, new_kind),
            None => Err(UsageError::NotInitialized),
        };
        result.map_err(|e| self.report_usage(e))
    }

    /// Free an object and its table slot.
    pub fn free_object(&mut self, handle: ObjectHandle) -> Result<(), UsageError> {
        let result = match self.state.as_mut() {
            Some(state) => state.objects.free(handle),
            None => Err(UsageError::NotInitialized),
        };
        result.map_err(|e| self.report_usage(e))
    }

    /// The kind currently stored at `handle`.
    pub fn object_kind(&self, handle: ObjectHandle) -> Result<ObjectKind, UsageError> {
        let result = match self.state.as_ref() {
            Some(state) => state.objects.kind_of(handle),
            None => Err(UsageError::NotInitialized),
        };
        result.map_err(|e| self.report_usage(e))
    }

    /// The caller-owned user-data word at `handle`.
    pub fn user_data(&self, handle: ObjectHandle) -> Result<usize, UsageError> {
        let result = match self.state.as_ref() {
            Some(state) => state.objects.user_data(handle),
            None => Err(UsageError::NotInitialized),
        };
        result.map_err(|e| self.report_usage(e))
    }

    /// Set the caller-owned user-data word at `handle`.
    pub fn set_user_data(&mut self, handle: ObjectHandle, data: usize) -> Result<(), UsageError> {
        let result = match self.state.as_mut() {
            Some(state) => state.objects.set_user_data(handle, data),
            None => Err(UsageError::NotInitialized),
        };
        result.map_err(|e| self.report_usage(e))
    }

    /// Dereference `handle` as a pending window.
    pub fn pending_window(&self, handle: ObjectHandle) -> Result<&PendingWindow, UsageError> {
        let state = self.state_ref()?;
        match state.objects.pending_window(handle) {
            Ok(record) => Ok(record),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// Dereference `handle` as a realized window.
    pub fn window(&self, handle: ObjectHandle) -> Result<&Window, UsageError> {
        let state = self.state_ref()?;
        match state.objects.window(handle) {
            Ok(record) => Ok(record),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// Dereference `handle` as a pending GL context.
    pub fn pending_gl_context(
        &self,
        handle: ObjectHandle,
    ) -> Result<&PendingGlContext, UsageError> {
        let state = self.state_ref()?;
        match state.objects.pending_gl_context(handle) {
            Ok(record) => Ok(record),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// Dereference `handle` as a realized GL context.
    pub fn gl_context(&self, handle: ObjectHandle) -> Result<&GlContext, UsageError> {
        let state = self.state_ref()?;
        match state.objects.gl_context(handle) {
            Ok(record) => Ok(record),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// Dereference `handle` as a framebuffer format.
    pub fn framebuffer_format(
        &self,
        handle: ObjectHandle,
    ) -> Result<&FramebufferFormat, UsageError> {
        let state = self.state_ref()?;
        match state.objects.framebuffer_format(handle) {
            Ok(record) => Ok(record),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// Mutable access to the object table, for filling records in.
    ///
    /// Usage errors from calls made directly on the table are returned as
    /// values but do not pass through the error sink; the proxied
    /// operations on `Context` do both.
    pub fn objects_mut(&mut self) -> Result<&mut ObjectTable, UsageError> {
        match self.state.as_mut() {
            Some(state) => Ok(&mut state.objects),
            None => Err(UsageError::NotInitialized),
        }
    }

    // ── events ───────────────────────────────────────────────

    /// Append an event to the back buffer.
    ///
    /// The event becomes visible to [`Context::events`] after the next
    /// [`Context::frame_boundary`].
    pub fn append_event(
        &mut self,
        timestamp: EventTimestamp,
        payload: EventPayload,
    ) -> Result<(), UsageError> {
        match self.state.as_mut() {
            Some(state) => {
                state.events.append(timestamp, payload);
                Ok(())
            }
            None => Err(self.report_usage(UsageError::NotInitialized)),
        }
    }

    /// Last frame's events, frozen until the next boundary.
    pub fn events(&self) -> Result<&[Event], UsageError> {
        self.state_ref().map(|state| state.events.front())
    }

    /// The front-buffer event at `index`.
    pub fn event(&self, index: usize) -> Result<&Event, UsageError> {
        let state = self.state_ref()?;
        match state.events.event(index) {
            Ok(event) => Ok(event),
            Err(e) => Err(self.report_usage(e)),
        }
    }

    /// The window current for events being appended now.
    pub fn current_window(&self) -> Result<Option<ObjectHandle>, UsageError> {
        self.state_ref().map(|state| state.events.current_window())
    }

    // ── scratch memory ───────────────────────────────────────

    /// Allocate `len` bytes of frame-lifetime scratch memory.
    pub fn scratch_alloc(&mut self, len: u32) -> Result<ArenaSpan, ContextError> {
        let result = match self.state.as_mut() {
            Some(state) => state.scratch.alloc(len).map_err(ContextError::from),
            None => Err(UsageError::NotInitialized.into()),
        };
        result.map_err(|e| self.report_context(e))
    }

    /// Allocate aligned frame-lifetime scratch memory.
    pub fn scratch_alloc_aligned(
        &mut self,
        len: u32,
        align: u32,
    ) -> Result<ArenaSpan, ContextError> {
        let result = match self.state.as_mut() {
            Some(state) => state
                .scratch
                .alloc_aligned(len, align)
                .map_err(ContextError::from),
            None => Err(UsageError::NotInitialized.into()),
        };
        result.map_err(|e| self.report_context(e))
    }

    /// Resolve a scratch span to its bytes.
    ///
    /// # Panics
    ///
    /// Panics if `span` was invalidated by a frame boundary.
    pub fn scratch_bytes(&self, span: ArenaSpan) -> Result<&[u8], UsageError> {
        self.state_ref().map(|state| state.scratch.slice(span))
    }

    /// Resolve a scratch span to its bytes, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `span` was invalidated by a frame boundary.
    pub fn scratch_bytes_mut(&mut self, span: ArenaSpan) -> Result<&mut [u8], UsageError> {
        if self.state.is_none() {
            return Err(self.report_usage(UsageError::NotInitialized));
        }
        Ok(self.state.as_mut().unwrap().scratch.slice_mut(span))
    }

    /// Total bytes the scratch arena holds from its backing allocator.
    pub fn scratch_memory_bytes(&self) -> Result<usize, UsageError> {
        self.state_ref()
            .map(|state| state.scratch.memory_bytes())
    }

    fn state_ref(&self) -> Result<&ContextState, UsageError> {
        match self.state.as_ref() {
            Some(state) => Ok(state),
            None => Err(self.report_usage(UsageError::NotInitialized)),
        }
    }

    fn report_usage(&self, err: UsageError) -> UsageError {
        self.sink.report(ErrorClass::Usage, &err.to_string());
        err
    }

    fn report_context(&self, err: ContextError) -> ContextError {
        let class = match &err {
            ContextError::Usage(_) => ErrorClass::Usage,
            ContextError::Arena(_) => ErrorClass::External,
        };
        self.sink.report(class, &err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ready() -> Context {
        let mut ctx = Context::new();
        ctx.init(ContextConfig::new()).unwrap();
        ctx
    }

    #[test]
    fn deinit_before_init_is_inert() {
        let mut ctx = Context::new();
        ctx.deinit();
        ctx.deinit();
        assert!(!ctx.is_initialized());
    }

    #[test]
    fn init_twice_is_a_usage_error() {
        let mut ctx = ready();
        let result = ctx.init(ContextConfig::new());
        assert_eq!(
            result,
            Err(ContextError::Usage(UsageError::AlreadyInitialized))
        );
        // The context stays usable.
        assert!(ctx.is_initialized());
    }

    #[test]
    fn reinit_after_deinit_starts_fresh() {
        let mut ctx = ready();
        ctx.create_object(ObjectKind::Window).unwrap();
        ctx.deinit();
        ctx.init(ContextConfig::new()).unwrap();
        // Handle numbering restarts: nothing survived the teardown.
        let h = ctx.create_object(ObjectKind::Window).unwrap();
        assert_eq!(h.raw(), 1);
    }

    #[test]
    fn operations_on_uninitialized_context_report() {
        let seen: Rc<RefCell<Vec<ErrorClass>>> = Rc::default();
        let seen2 = Rc::clone(&seen);
        let mut ctx =
            Context::with_sink(ErrorSink::with_callback(move |_msg, class| {
                seen2.borrow_mut().push(class);
            }));

        assert_eq!(
            ctx.create_object(ObjectKind::Window),
            Err(UsageError::NotInitialized)
        );
        assert_eq!(ctx.events().err(), Some(UsageError::NotInitialized));
        assert_eq!(seen.borrow().as_slice(), &[ErrorClass::Usage, ErrorClass::Usage]);
    }

    #[test]
    fn handle_zero_reports_null() {
        let ctx = ready();
        assert_eq!(ctx.handle_from_raw(0), Err(UsageError::NullHandle));
        assert_eq!(ctx.handle_from_raw(1).unwrap().raw(), 1);
    }

    #[test]
    fn pending_window_becomes_window_at_the_same_handle() {
        let mut ctx = ready();
        let h = ctx.create_object(ObjectKind::PendingWindow).unwrap();
        ctx.set_user_data(h, 7).unwrap();
        {
            let objects = ctx.objects_mut().unwrap();
            let pending = objects.pending_window_mut(h).unwrap();
            pending.title = "editor".into();
            pending.width = 1280;
        }

        ctx.transition_object(h, ObjectKind::Window).unwrap();

        assert_eq!(ctx.object_kind(h), Ok(ObjectKind::Window));
        assert_eq!(ctx.user_data(h), Ok(7));
        assert!(matches!(
            ctx.pending_window(h),
            Err(UsageError::WrongKind { .. })
        ));
        assert!(ctx.window(h).is_ok());
    }

    #[test]
    fn frame_boundary_publishes_events_and_resets_scratch() {
        let mut ctx = ready();
        let span = ctx.scratch_alloc(128).unwrap();
        ctx.scratch_bytes_mut(span).unwrap().fill(0xEE);
        ctx.append_event(
            EventTimestamp(10),
            EventPayload::TextInput { codepoint: '!' },
        )
        .unwrap();
        assert!(ctx.events().unwrap().is_empty());

        ctx.frame_boundary().unwrap();

        assert_eq!(ctx.events().unwrap().len(), 1);
        // A fresh frame's scratch starts from a clean cursor.
        let fresh = ctx.scratch_alloc(16).unwrap();
        assert_eq!(fresh.offset(), 0);
    }

    #[test]
    fn usage_errors_flow_through_the_sink() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        let seen2 = Rc::clone(&seen);
        let mut ctx =
            Context::with_sink(ErrorSink::with_callback(move |msg, _class| {
                seen2.borrow_mut().push(msg.to_string());
            }));
        ctx.init(ContextConfig::new()).unwrap();

        let h = ctx.create_object(ObjectKind::GlContext).unwrap();
        let _ = ctx.window(h);
        let _ = ctx.event(5);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("expected a window"));
        assert!(seen[1].contains("out of range"));
    }

    #[test]
    fn scratch_round_trips_bytes() {
        let mut ctx = ready();
        let span = ctx.scratch_alloc_aligned(4, 4).unwrap();
        ctx.scratch_bytes_mut(span)
            .unwrap()
            .copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(ctx.scratch_bytes(span).unwrap(), &[1, 2, 3, 4]);
    }
}
