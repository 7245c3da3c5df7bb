//! Concrete record types backing each object kind.
//!
//! Records are plain data: the backend dispatch layer fills them in and the
//! substrate only stores and indexes them. Everything is
//! `Default`-constructible so [`ObjectTable::allocate`](crate::ObjectTable::allocate)
//! can hand out a zeroed record for the caller to populate.

use sill_core::BackendRef;

/// A window under construction: configured by the caller, not yet realized
/// by the windowing backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingWindow {
    /// Requested title.
    pub title: String,
    /// Requested inner width in pixels. Zero means "backend default".
    pub width: u32,
    /// Requested inner height in pixels. Zero means "backend default".
    pub height: u32,
    /// Whether the user may resize the window.
    pub resizable: bool,
}

/// A realized window.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Window {
    /// Backend-owned window resource.
    pub backend: BackendRef,
    /// Current title.
    pub title: String,
    /// Current inner width in pixels.
    pub width: u32,
    /// Current inner height in pixels.
    pub height: u32,
    /// Whether this window currently has input focus.
    pub focused: bool,
}

/// A GL context under construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingGlContext {
    /// Requested GL major version.
    pub major: u8,
    /// Requested GL minor version.
    pub minor: u8,
    /// Requested depth buffer bits.
    pub depth_bits: u8,
    /// Requested stencil buffer bits.
    pub stencil_bits: u8,
    /// Requested multisample count. Zero disables multisampling.
    pub samples: u8,
}

/// A realized GL context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlContext {
    /// Backend-owned context resource.
    pub backend: BackendRef,
    /// Actual GL major version.
    pub major: u8,
    /// Actual GL minor version.
    pub minor: u8,
}

/// An immutable framebuffer format description, as enumerated from the
/// backend at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FramebufferFormat {
    /// Red channel bits.
    pub red_bits: u8,
    /// Green channel bits.
    pub green_bits: u8,
    /// Blue channel bits.
    pub blue_bits: u8,
    /// Alpha channel bits.
    pub alpha_bits: u8,
    /// Depth buffer bits.
    pub depth_bits: u8,
    /// Stencil buffer bits.
    pub stencil_bits: u8,
    /// Multisample count.
    pub samples: u8,
}
