//! Event records.

use sill_core::{EventTimestamp, ObjectHandle};

/// Backend-specific key code.
///
/// The substrate stores the code verbatim; mapping from the backend's
/// scancode space (SDL, X11, ...) happens in the backend layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

/// Bitmask of currently-held mouse buttons, bit 0 = primary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseButtons(pub u32);

impl MouseButtons {
    /// Whether the button at `bit` is held.
    pub fn is_held(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }
}

/// One event as seen by the application for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Producer-supplied timestamp.
    pub timestamp: EventTimestamp,
    /// The window that was current when this event was appended.
    ///
    /// Focus events update the queue's current window before the record is
    /// captured, so this field reflects append order within the frame.
    pub current_window: Option<ObjectHandle>,
    /// Kind-specific payload.
    pub payload: EventPayload,
}

/// Kind-specific event payloads.
///
/// Everything is fixed-size except [`EventPayload::ClipboardChanged`],
/// which owns its text; the string lives exactly as long as the record
/// does — one frame on the front buffer — and is dropped when the buffer
/// is cleared for reuse.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// The user asked a window to close.
    CloseSignal {
        /// The window being closed.
        window: ObjectHandle,
    },
    /// A window's inner size changed.
    Resize {
        /// The resized window.
        window: ObjectHandle,
        /// Previous inner width in pixels.
        old_width: u32,
        /// Previous inner height in pixels.
        old_height: u32,
        /// New inner width in pixels.
        width: u32,
        /// New inner height in pixels.
        height: u32,
    },
    /// Input focus moved.
    Focus {
        /// The newly focused window, or `None` when focus left the
        /// application entirely.
        window: Option<ObjectHandle>,
    },
    /// Part of a window was exposed and needs redrawing.
    Exposure {
        /// The exposed window.
        window: ObjectHandle,
        /// Left edge of the exposed rectangle.
        x: u32,
        /// Top edge of the exposed rectangle.
        y: u32,
        /// Width of the exposed rectangle.
        width: u32,
        /// Height of the exposed rectangle.
        height: u32,
    },
    /// A key changed state.
    Keyboard {
        /// Backend key code.
        key: Key,
        /// `true` on press, `false` on release.
        down: bool,
        /// Whether this is an auto-repeat press.
        repeat: bool,
    },
    /// The cursor moved within a window.
    CursorMove {
        /// The window under the cursor.
        window: ObjectHandle,
        /// Previous cursor x, window-relative pixels.
        old_x: u32,
        /// Previous cursor y, window-relative pixels.
        old_y: u32,
        /// New cursor x, window-relative pixels.
        x: u32,
        /// New cursor y, window-relative pixels.
        y: u32,
    },
    /// The cursor crossed a window boundary.
    CursorTransition {
        /// The window being entered, or `None` when the cursor left for
        /// somewhere outside the application.
        window: Option<ObjectHandle>,
    },
    /// Text input produced a codepoint.
    TextInput {
        /// The decoded unicode codepoint.
        codepoint: char,
    },
    /// The user scrolled.
    Scroll {
        /// Vertical scroll amount, positive away from the user.
        vertical: f32,
        /// Horizontal scroll amount, positive rightward.
        horizontal: f32,
    },
    /// The system clipboard changed.
    ClipboardChanged {
        /// The new clipboard text.
        text: String,
    },
    /// The held mouse-button set changed.
    MouseButton {
        /// Buttons held before the change.
        old_buttons: MouseButtons,
        /// Buttons held after the change.
        buttons: MouseButtons,
    },
}
