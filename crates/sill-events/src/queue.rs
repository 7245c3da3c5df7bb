//! The double-buffered event queue.

use sill_core::{EventTimestamp, ObjectHandle, UsageError};

use crate::event::{Event, EventPayload};

/// Initial event capacity per buffer; growth doubles from here.
const FIRST_CAPACITY: usize = 8;

/// Double-buffered event queue with an O(1) frame-boundary swap.
///
/// Exactly one buffer is the *back* buffer (appended to by producers) and
/// the other is the *front* buffer (read-only, exposed to the application)
/// at any time. [`EventQueue::frame_boundary`] swaps the roles and clears
/// the new back buffer, retaining its storage — buffers and capacities are
/// exchanged, never copied.
///
/// # Buffer roles
///
/// ```text
/// buffer_a: Vec<Event>  ←─── back (even frames) / front (odd frames)
/// buffer_b: Vec<Event>  ←─── front (even frames) / back (odd frames)
/// ```
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Event buffer A.
    buffer_a: Vec<Event>,
    /// Event buffer B.
    buffer_b: Vec<Event>,
    /// Which buffer is currently back (false = A back, true = B back).
    b_is_back: bool,
    /// The window considered current for events being appended now.
    ///
    /// Updated as a side effect of appending a focus event; every record
    /// appended afterwards in the same frame captures the new value. The
    /// value carries across frame boundaries as the next frame's starting
    /// current window.
    current_window: Option<ObjectHandle>,
}

impl EventQueue {
    /// Create an empty queue. Both buffers start at the initial capacity.
    pub fn new() -> Self {
        Self {
            buffer_a: Vec::with_capacity(FIRST_CAPACITY),
            buffer_b: Vec::with_capacity(FIRST_CAPACITY),
            b_is_back: false,
            current_window: None,
        }
    }

    /// Append an event to the back buffer.
    ///
    /// A [`EventPayload::Focus`] payload updates the current window first,
    /// so the focus record itself and everything appended after it this
    /// frame carry the newly focused window.
    pub fn append(&mut self, timestamp: EventTimestamp, payload: EventPayload) {
        if let EventPayload::Focus { window } = payload {
            self.current_window = window;
        }
        let event = Event {
            timestamp,
            current_window: self.current_window,
            payload,
        };
        let back = if self.b_is_back {
            &mut self.buffer_b
        } else {
            &mut self.buffer_a
        };
        if back.len() == back.capacity() {
            let target = (back.capacity() * 2).max(FIRST_CAPACITY);
            back.reserve_exact(target - back.len());
        }
        back.push(event);
    }

    /// Swap the buffer roles for a new frame.
    ///
    /// Last frame's back buffer becomes the front buffer; the old front
    /// buffer is cleared (count zero, storage retained) and becomes the
    /// new back buffer. The current window carries forward unchanged.
    pub fn frame_boundary(&mut self) {
        self.b_is_back = !self.b_is_back;
        let back = if self.b_is_back {
            &mut self.buffer_b
        } else {
            &mut self.buffer_a
        };
        back.clear();
    }

    /// Last frame's events, frozen until the next boundary.
    pub fn front(&self) -> &[Event] {
        if self.b_is_back {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Number of events in the front buffer.
    pub fn len(&self) -> usize {
        self.front().len()
    }

    /// Whether the front buffer holds no events.
    pub fn is_empty(&self) -> bool {
        self.front().is_empty()
    }

    /// The front-buffer event at `index`.
    pub fn event(&self, index: usize) -> Result<&Event, UsageError> {
        let front = self.front();
        front.get(index).ok_or(UsageError::EventIndexOutOfRange {
            index,
            len: front.len(),
        })
    }

    /// Number of events appended to the back buffer so far this frame.
    pub fn back_len(&self) -> usize {
        if self.b_is_back {
            self.buffer_b.len()
        } else {
            self.buffer_a.len()
        }
    }

    /// The window current for events being appended now.
    pub fn current_window(&self) -> Option<ObjectHandle> {
        self.current_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(raw: u32) -> ObjectHandle {
        ObjectHandle::from_raw(raw).unwrap()
    }

    fn at(ms: i64) -> EventTimestamp {
        EventTimestamp(ms)
    }

    #[test]
    fn appends_are_invisible_until_the_boundary() {
        let mut queue = EventQueue::new();
        queue.append(
            at(1),
            EventPayload::CloseSignal { window: handle(1) },
        );
        assert!(queue.is_empty());
        assert_eq!(queue.back_len(), 1);

        queue.frame_boundary();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.back_len(), 0);
    }

    #[test]
    fn front_is_frozen_between_boundaries() {
        let mut queue = EventQueue::new();
        queue.append(at(1), EventPayload::TextInput { codepoint: 'a' });
        queue.frame_boundary();
        assert_eq!(queue.len(), 1);

        // Producing into the new frame must not disturb the front buffer.
        queue.append(at(2), EventPayload::TextInput { codepoint: 'b' });
        queue.append(at(3), EventPayload::TextInput { codepoint: 'c' });
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.event(0).unwrap().payload,
            EventPayload::TextInput { codepoint: 'a' }
        );

        queue.frame_boundary();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn out_of_range_index_is_a_usage_error() {
        let mut queue = EventQueue::new();
        queue.append(at(1), EventPayload::TextInput { codepoint: 'x' });
        queue.frame_boundary();
        assert!(queue.event(0).is_ok());
        assert_eq!(
            queue.event(1),
            Err(UsageError::EventIndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn focus_updates_the_focus_record_and_later_events() {
        let mut queue = EventQueue::new();
        queue.append(at(1), EventPayload::TextInput { codepoint: 'a' });
        queue.append(
            at(2),
            EventPayload::Focus {
                window: Some(handle(7)),
            },
        );
        queue.append(at(3), EventPayload::TextInput { codepoint: 'b' });
        queue.frame_boundary();

        // Before the focus event: no current window.
        assert_eq!(queue.event(0).unwrap().current_window, None);
        // The focus record itself carries the newly focused window...
        assert_eq!(queue.event(1).unwrap().current_window, Some(handle(7)));
        // ...and so does everything after it in the same frame.
        assert_eq!(queue.event(2).unwrap().current_window, Some(handle(7)));
    }

    #[test]
    fn current_window_carries_across_the_boundary() {
        let mut queue = EventQueue::new();
        queue.append(
            at(1),
            EventPayload::Focus {
                window: Some(handle(3)),
            },
        );
        queue.frame_boundary();
        assert_eq!(queue.current_window(), Some(handle(3)));

        queue.append(at(2), EventPayload::TextInput { codepoint: 'z' });
        queue.frame_boundary();
        assert_eq!(queue.event(0).unwrap().current_window, Some(handle(3)));
    }

    #[test]
    fn losing_focus_clears_the_current_window() {
        let mut queue = EventQueue::new();
        queue.append(
            at(1),
            EventPayload::Focus {
                window: Some(handle(2)),
            },
        );
        queue.append(at(2), EventPayload::Focus { window: None });
        queue.append(at(3), EventPayload::TextInput { codepoint: 'q' });
        queue.frame_boundary();
        assert_eq!(queue.event(2).unwrap().current_window, None);
    }

    #[test]
    fn swap_alternates_buffers_without_copying_events() {
        let mut queue = EventQueue::new();
        for i in 0..20 {
            queue.append(at(i), EventPayload::TextInput { codepoint: 'x' });
        }
        queue.frame_boundary();
        assert_eq!(queue.len(), 20);

        queue.frame_boundary();
        // The 20-event frame rotated out; the new front is the cleared
        // buffer from two boundaries ago.
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn clipboard_text_lives_for_one_front_frame() {
        let mut queue = EventQueue::new();
        queue.append(
            at(1),
            EventPayload::ClipboardChanged {
                text: "copied".into(),
            },
        );
        queue.frame_boundary();
        match &queue.event(0).unwrap().payload {
            EventPayload::ClipboardChanged { text } => assert_eq!(text, "copied"),
            other => panic!("unexpected payload {other:?}"),
        }
        // Two boundaries later the record (and its text) is gone.
        queue.frame_boundary();
        queue.frame_boundary();
        assert!(queue.is_empty());
    }

    #[test]
    fn timestamps_and_order_are_preserved() {
        let mut queue = EventQueue::new();
        for i in 0..5 {
            queue.append(
                at(100 + i),
                EventPayload::Scroll {
                    vertical: i as f32,
                    horizontal: 0.0,
                },
            );
        }
        queue.frame_boundary();
        for i in 0..5usize {
            let e = queue.event(i).unwrap();
            assert_eq!(e.timestamp, at(100 + i as i64));
        }
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The front buffer always shows exactly the events appended
            /// in the window before the most recent boundary, regardless
            /// of how appends and boundaries interleave.
            #[test]
            fn front_mirrors_the_previous_window(
                ops in proptest::collection::vec(proptest::bool::ANY, 1..120),
            ) {
                let mut queue = EventQueue::new();
                let mut appended_this_window = 0usize;
                let mut published = 0usize;

                for (i, &is_append) in ops.iter().enumerate() {
                    if is_append {
                        queue.append(
                            at(i as i64),
                            EventPayload::TextInput { codepoint: 'p' },
                        );
                        appended_this_window += 1;
                    } else {
                        queue.frame_boundary();
                        published = appended_this_window;
                        appended_this_window = 0;
                    }
                    prop_assert_eq!(queue.len(), published);
                    prop_assert_eq!(queue.back_len(), appended_this_window);
                }

                // Every front index below the count resolves; the one at
                // the count does not.
                for i in 0..queue.len() {
                    prop_assert!(queue.event(i).is_ok());
                }
                prop_assert!(queue.event(queue.len()).is_err());
            }
        }
    }
}
