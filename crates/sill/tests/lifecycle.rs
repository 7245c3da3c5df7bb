//! End-to-end lifecycle tests across the whole substrate.

use sill::prelude::*;

fn ready() -> Context {
    let mut ctx = Context::new();
    ctx.init(ContextConfig::new()).unwrap();
    ctx
}

#[test]
fn handle_reuse_round_trip() {
    let mut ctx = ready();

    // Three objects of one kind.
    let a = ctx.create_object(ObjectKind::PendingWindow).unwrap();
    let b = ctx.create_object(ObjectKind::PendingWindow).unwrap();
    let c = ctx.create_object(ObjectKind::PendingWindow).unwrap();
    assert_eq!((a.raw(), b.raw(), c.raw()), (1, 2, 3));

    {
        let objects = ctx.objects_mut().unwrap();
        objects.pending_window_mut(a).unwrap().width = 100;
        objects.pending_window_mut(c).unwrap().width = 300;
    }

    // Free the middle one; a new object of a different kind must reuse
    // the freed table slot deterministically.
    ctx.free_object(b).unwrap();
    let d = ctx.create_object(ObjectKind::FramebufferFormat).unwrap();
    assert_eq!(d.raw(), b.raw());

    // The untouched neighbours keep their indices and data.
    assert_eq!(ctx.pending_window(a).unwrap().width, 100);
    assert_eq!(ctx.pending_window(c).unwrap().width, 300);
    assert_eq!(ctx.object_kind(d), Ok(ObjectKind::FramebufferFormat));
}

#[test]
fn identity_is_continuous_across_transition() {
    let mut ctx = ready();
    let h = ctx.create_object(ObjectKind::PendingGlContext).unwrap();
    ctx.set_user_data(h, 0xC0FFEE).unwrap();
    ctx.objects_mut()
        .unwrap()
        .pending_gl_context_mut(h)
        .unwrap()
        .major = 4;

    ctx.transition_object(h, ObjectKind::GlContext).unwrap();

    // Same handle, same user data; old kind rejected, new kind served.
    assert_eq!(ctx.user_data(h), Ok(0xC0FFEE));
    assert!(matches!(
        ctx.pending_gl_context(h),
        Err(UsageError::WrongKind { .. })
    ));
    let realized = ctx.gl_context(h).unwrap();
    // The new record starts from default; the backend layer fills it.
    assert_eq!(realized.major, 0);
}

#[test]
fn events_are_isolated_per_frame() {
    let mut ctx = ready();
    let win = ctx.create_object(ObjectKind::Window).unwrap();

    ctx.append_event(
        EventTimestamp(1),
        EventPayload::Focus { window: Some(win) },
    )
    .unwrap();
    ctx.append_event(
        EventTimestamp(2),
        EventPayload::Resize {
            window: win,
            old_width: 640,
            old_height: 480,
            width: 800,
            height: 600,
        },
    )
    .unwrap();

    ctx.frame_boundary().unwrap();
    assert_eq!(ctx.events().unwrap().len(), 2);

    // Frame 2 production is invisible through the frozen front buffer.
    ctx.append_event(
        EventTimestamp(3),
        EventPayload::CloseSignal { window: win },
    )
    .unwrap();
    assert_eq!(ctx.events().unwrap().len(), 2);
    assert!(matches!(
        ctx.event(0).unwrap().payload,
        EventPayload::Focus { .. }
    ));

    ctx.frame_boundary().unwrap();
    assert_eq!(ctx.events().unwrap().len(), 1);
    // The focus from frame 1 is still the current window in frame 3.
    assert_eq!(ctx.event(0).unwrap().current_window, Some(win));
}

#[test]
fn scratch_spans_die_at_the_boundary_but_memory_is_retained() {
    let mut ctx = ready();
    let spans: Vec<ArenaSpan> = (0..10)
        .map(|_| ctx.scratch_alloc(1000).unwrap())
        .collect();
    for (i, &span) in spans.iter().enumerate() {
        ctx.scratch_bytes_mut(span).unwrap().fill(i as u8);
    }
    let held_before = ctx.scratch_memory_bytes().unwrap();

    ctx.frame_boundary().unwrap();

    // The retain budget keeps blocks cached without exceeding it by more
    // than the bucket granularity.
    let held_after = ctx.scratch_memory_bytes().unwrap();
    assert!(held_after <= held_before);
    assert!(held_after >= ContextConfig::DEFAULT_FRAME_RETAIN_BYTES.min(held_before));

    // A fresh frame allocates from a clean cursor.
    let fresh = ctx.scratch_alloc(8).unwrap();
    assert_eq!(fresh.offset(), 0);
}

#[test]
fn deinit_is_safe_mid_frame() {
    let mut ctx = ready();
    let win = ctx.create_object(ObjectKind::Window).unwrap();
    ctx.append_event(EventTimestamp(1), EventPayload::CloseSignal { window: win })
        .unwrap();
    ctx.scratch_alloc(4096).unwrap();

    // Tear down with a back buffer half-full and scratch live.
    ctx.deinit();
    assert!(!ctx.is_initialized());
    assert_eq!(ctx.events().err(), Some(UsageError::NotInitialized));
}
