//! The object-kind discriminator.

use std::fmt;

/// Identifies which concrete record type (and thus which backing pool) an
/// object-table entry refers to.
///
/// The `Pending*` kinds are objects under construction: a window or GL
/// context that has been configured by the caller but not yet realized by
/// the windowing backend. Realization transitions the entry to the complete
/// kind in place, keeping the external handle and user data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A window under construction.
    PendingWindow,
    /// A realized window.
    Window,
    /// A GL context under construction.
    PendingGlContext,
    /// A realized GL context.
    GlContext,
    /// An immutable framebuffer format description.
    FramebufferFormat,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PendingWindow => "pending window",
            Self::Window => "window",
            Self::PendingGlContext => "pending gl context",
            Self::GlContext => "gl context",
            Self::FramebufferFormat => "framebuffer format",
        };
        f.write_str(name)
    }
}
