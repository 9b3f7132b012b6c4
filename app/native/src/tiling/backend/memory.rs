//! In-process display backend.
//!
//! Simulates a single focused window on a set of monitors. Moves update the
//! simulated window the way a reparenting window manager would: the client
//! window lands on the requested rectangle and the frame grows around it by
//! the configured decoration insets. Every mutating call is recorded so tests
//! can assert exactly what the pipeline asked for.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{DisplayBackend, WindowGeometry};
use crate::tiling::error::{TilingError, TilingResult};
use crate::tiling::state::{Insets, Rect};

/// A mutating request received by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendCall {
    Unmaximize,
    MoveResize(Rect),
}

#[derive(Debug, Default)]
struct MemoryState {
    monitors: Vec<Rect>,
    focused: Option<WindowGeometry>,
    insets: Insets,
    maximized: bool,
    failure: Option<String>,
    failure_once: Option<String>,
    calls: Vec<BackendCall>,
}

/// Scripted display backend. Cheap to clone; clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// Creates a backend with the given monitors and no focused window.
    #[must_use]
    pub fn new(monitors: Vec<Rect>) -> Self {
        let backend = Self::default();
        backend.state.lock().monitors = monitors;
        backend
    }

    /// Sets the decoration insets the simulated window manager adds.
    #[must_use]
    pub fn with_insets(self, insets: Insets) -> Self {
        self.state.lock().insets = insets;
        self
    }

    /// Focuses a window whose decorated frame is `frame`.
    #[must_use]
    pub fn with_focused_frame(self, frame: Rect) -> Self {
        self.focus_frame(frame);
        self
    }

    /// Focuses a window whose decorated frame is `frame`.
    pub fn focus_frame(&self, frame: Rect) {
        let mut state = self.state.lock();
        let window = state.insets.shrink(frame);
        state.focused = Some(WindowGeometry::new(window, frame));
    }

    /// Removes focus from every window.
    pub fn clear_focus(&self) { self.state.lock().focused = None; }

    /// Marks the focused window as maximized.
    pub fn set_maximized(&self, maximized: bool) { self.state.lock().maximized = maximized; }

    /// Makes every subsequent query fail with `message`, or clears the
    /// failure when `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        self.state.lock().failure = message.map(str::to_string);
    }

    /// Makes only the next query fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.state.lock().failure_once = Some(message.to_string());
    }

    /// Current geometry of the focused window.
    #[must_use]
    pub fn focused(&self) -> Option<WindowGeometry> { self.state.lock().focused }

    #[must_use]
    pub fn is_maximized(&self) -> bool { self.state.lock().maximized }

    /// Every mutating call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> { self.state.lock().calls.clone() }

    /// Only the move requests received so far, in order.
    #[must_use]
    pub fn moves(&self) -> Vec<Rect> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::MoveResize(rect) => Some(*rect),
                BackendCall::Unmaximize => None,
            })
            .collect()
    }

    fn check_failure(state: &mut MemoryState) -> TilingResult<()> {
        if let Some(message) = state.failure_once.take() {
            return Err(TilingError::backend(message));
        }
        state.failure.as_ref().map_or(Ok(()), |message| Err(TilingError::backend(message.clone())))
    }
}

impl DisplayBackend for MemoryBackend {
    fn monitors(&self) -> TilingResult<Vec<Rect>> {
        let mut state = self.state.lock();
        Self::check_failure(&mut state)?;
        Ok(state.monitors.clone())
    }

    fn focused_window(&self) -> TilingResult<WindowGeometry> {
        let mut state = self.state.lock();
        Self::check_failure(&mut state)?;
        state.focused.ok_or(TilingError::NoFocusedWindow)
    }

    fn unmaximize(&self) -> TilingResult<()> {
        let mut state = self.state.lock();
        Self::check_failure(&mut state)?;
        state.maximized = false;
        state.calls.push(BackendCall::Unmaximize);
        Ok(())
    }

    fn move_resize(&self, frame: Rect) -> TilingResult<()> {
        let mut state = self.state.lock();
        Self::check_failure(&mut state)?;
        if state.focused.is_none() {
            return Err(TilingError::NoFocusedWindow);
        }
        let decorated = state.insets.expand(frame);
        state.focused = Some(WindowGeometry::new(frame, decorated));
        state.calls.push(BackendCall::MoveResize(frame));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_frame_derives_window_from_insets() {
        let backend = MemoryBackend::new(vec![Rect::new(0, 0, 1920, 1080)])
            .with_insets(Insets::new(4, 30))
            .with_focused_frame(Rect::new(0, 0, 960, 1080));
        let geometry = backend.focused_window().unwrap();
        assert_eq!(geometry.window, Rect::new(2, 28, 956, 1050));
        assert_eq!(geometry.decoration_insets(), Insets::new(4, 30));
    }

    #[test]
    fn test_move_resize_places_frame_around_window() {
        let backend = MemoryBackend::new(vec![Rect::new(0, 0, 1920, 1080)])
            .with_insets(Insets::new(4, 30))
            .with_focused_frame(Rect::new(100, 100, 400, 300));
        backend.move_resize(Rect::new(2, 28, 956, 1050)).unwrap();
        assert_eq!(backend.focused().unwrap().frame, Rect::new(0, 0, 960, 1080));
        assert_eq!(backend.moves(), vec![Rect::new(2, 28, 956, 1050)]);
    }

    #[test]
    fn test_no_focus_reports_error() {
        let backend = MemoryBackend::new(vec![Rect::new(0, 0, 1920, 1080)]);
        assert_eq!(backend.focused_window(), Err(TilingError::NoFocusedWindow));
        assert_eq!(backend.move_resize(Rect::new(0, 0, 1, 1)), Err(TilingError::NoFocusedWindow));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_failure_applies_to_every_call() {
        let backend = MemoryBackend::new(vec![Rect::new(0, 0, 1920, 1080)])
            .with_focused_frame(Rect::new(0, 0, 10, 10));
        backend.set_failure(Some("display gone"));
        assert!(matches!(backend.monitors(), Err(TilingError::Backend(_))));
        assert!(matches!(backend.unmaximize(), Err(TilingError::Backend(_))));

        backend.set_failure(None);
        assert!(backend.monitors().is_ok());
    }

    #[test]
    fn test_one_shot_failure_hits_only_the_next_query() {
        let backend = MemoryBackend::new(vec![Rect::new(0, 0, 1920, 1080)]);
        backend.fail_next("display busy");
        assert_eq!(backend.monitors(), Err(TilingError::backend("display busy")));
        assert_eq!(backend.monitors(), Ok(vec![Rect::new(0, 0, 1920, 1080)]));
    }

    #[test]
    fn test_unmaximize_clears_flag() {
        let backend = MemoryBackend::new(vec![]).with_focused_frame(Rect::new(0, 0, 10, 10));
        backend.set_maximized(true);
        backend.unmaximize().unwrap();
        assert!(!backend.is_maximized());
        assert_eq!(backend.calls(), vec![BackendCall::Unmaximize]);
    }

    #[test]
    fn test_clones_share_state() {
        let backend = MemoryBackend::new(vec![]).with_focused_frame(Rect::new(0, 0, 10, 10));
        let clone = backend.clone();
        clone.move_resize(Rect::new(5, 5, 5, 5)).unwrap();
        assert_eq!(backend.moves().len(), 1);
    }
}
