//! The error-reporting sink.
//!
//! The substrate never silently swallows a violation: every usage error,
//! external failure, and internal invariant breach is routed through an
//! [`ErrorSink`] before the triggering operation returns. The host picks
//! the policy — ignore, panic, or observe through a callback.

use std::fmt;

/// Classifies a reported error for the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller misused the API (bad handle, out-of-range index).
    Usage,
    /// An external collaborator failed (backing allocator exhausted,
    /// backend initialization failure).
    External,
    /// An invariant inside the substrate itself was violated. Always a
    /// defect in this codebase, never a caller error.
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Usage => "usage",
            Self::External => "external",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

enum SinkMode {
    Disabled,
    Panicking,
    Callback(Box<dyn Fn(&str, ErrorClass)>),
}

/// Destination for error reports.
///
/// Construction picks the response policy; the default is
/// [`ErrorSink::disabled`]. Operations return their `Result` values either
/// way, so a disabled sink loses only the side channel, not the error.
pub struct ErrorSink {
    mode: SinkMode,
}

impl ErrorSink {
    /// A sink that drops every report. `Result` values still propagate.
    pub fn disabled() -> Self {
        Self {
            mode: SinkMode::Disabled,
        }
    }

    /// A sink that panics on any report. Intended for development builds,
    /// where failing loudly at the violation site beats a deferred error.
    pub fn panicking() -> Self {
        Self {
            mode: SinkMode::Panicking,
        }
    }

    /// A sink that forwards every report to `callback`.
    pub fn with_callback(callback: impl Fn(&str, ErrorClass) + 'static) -> Self {
        Self {
            mode: SinkMode::Callback(Box::new(callback)),
        }
    }

    /// Report a violation.
    ///
    /// # Panics
    ///
    /// Panics when the sink was built with [`ErrorSink::panicking`].
    pub fn report(&self, class: ErrorClass, message: &str) {
        match &self.mode {
            SinkMode::Disabled => {}
            SinkMode::Panicking => panic!("{class} error: {message}"),
            SinkMode::Callback(cb) => cb(message, class),
        }
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            SinkMode::Disabled => "Disabled",
            SinkMode::Panicking => "Panicking",
            SinkMode::Callback(_) => "Callback",
        };
        f.debug_struct("ErrorSink").field("mode", &mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn disabled_sink_ignores_reports() {
        let sink = ErrorSink::disabled();
        sink.report(ErrorClass::Usage, "bad handle");
    }

    #[test]
    #[should_panic(expected = "internal error: broken invariant")]
    fn panicking_sink_panics() {
        let sink = ErrorSink::panicking();
        sink.report(ErrorClass::Internal, "broken invariant");
    }

    #[test]
    fn callback_sink_observes_class_and_message() {
        let seen: Rc<RefCell<Vec<(String, ErrorClass)>>> = Rc::default();
        let seen2 = Rc::clone(&seen);
        let sink = ErrorSink::with_callback(move |msg, class| {
            seen2.borrow_mut().push((msg.to_string(), class));
        });

        sink.report(ErrorClass::Usage, "handle 3 is vacant");
        sink.report(ErrorClass::External, "backing allocator exhausted");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("handle 3 is vacant".to_string(), ErrorClass::Usage));
        assert_eq!(seen[1].1, ErrorClass::External);
    }
}
