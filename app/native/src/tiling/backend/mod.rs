//! Display server access for the tiling pipeline.
//!
//! The pipeline only needs four things from the display server: the monitor
//! rectangles, the focused window's geometry, a way to clear its maximized
//! state, and a way to move and resize it. `DisplayBackend` is that seam.
//!
//! - `x11` talks to an EWMH-compliant X11 window manager
//! - `memory` is a scripted in-process backend used by tests and benches

pub mod memory;
pub mod x11;

pub use memory::{BackendCall, MemoryBackend};
pub use x11::X11Backend;

use super::error::TilingResult;
use super::state::{Insets, Rect};

/// Geometry of the focused window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowGeometry {
    /// The client window itself, without decorations.
    pub window: Rect,
    /// The frame the window manager wraps around the window, including
    /// borders and title bar.
    pub frame: Rect,
}

impl WindowGeometry {
    #[must_use]
    pub const fn new(window: Rect, frame: Rect) -> Self { Self { window, frame } }

    /// Extra pixels the decorations add on top of the window size.
    #[must_use]
    pub const fn decoration_insets(&self) -> Insets {
        Insets::new(self.frame.width - self.window.width, self.frame.height - self.window.height)
    }
}

/// Operations the tiling pipeline needs from the display server.
///
/// Implementations are driven from a single consumer thread, one command at a
/// time, so they need to be `Send` but never see concurrent calls.
pub trait DisplayBackend: Send {
    /// Returns the rectangle of every connected monitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the monitors cannot be queried.
    fn monitors(&self) -> TilingResult<Vec<Rect>>;

    /// Returns the geometry of the currently focused window.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::NoFocusedWindow`](super::error::TilingError::NoFocusedWindow)
    /// if nothing has focus, or a backend error if the query fails.
    fn focused_window(&self) -> TilingResult<WindowGeometry>;

    /// Clears the horizontal and vertical maximized state of the focused
    /// window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn unmaximize(&self) -> TilingResult<()>;

    /// Moves and resizes the focused window and flushes the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent.
    fn move_resize(&self, frame: Rect) -> TilingResult<()>;
}
