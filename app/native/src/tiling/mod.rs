//! Snap-assist style tiling for the focused window.
//!
//! One directional command runs the whole pipeline against live geometry:
//!
//! 1. Read the focused window and the monitors from the display backend
//! 2. Pick the monitor showing most of the window and build its [`Screen`]
//! 3. [`classify`] the window frame into a [`Position`]
//! 4. [`next_position`] decides the [`Target`] (or that nothing should move)
//! 5. Resolve the target to pixels, subtract decorations, move the window
//!
//! Nothing is remembered between commands. The window's position is always
//! re-derived from its geometry, so a dropped command never leaves stale state.

pub mod backend;
pub mod classify;
pub mod error;
pub mod screen;
pub mod state;
pub mod transition;

pub use backend::{DisplayBackend, WindowGeometry};
pub use classify::classify;
pub use error::{TilingError, TilingResult};
pub use screen::{Screen, active_monitor};
pub use state::{Corner, Direction, Insets, Point, Position, Rect, Size};
pub use transition::{Target, corner_exit, next_position};

/// What a directional command did to the focused window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The window was moved.
    Moved {
        /// Where the window was before the command.
        from: Position,
        /// The tiling it was moved to.
        target: Target,
        /// The target region on screen, decorations included.
        region: Rect,
        /// The rectangle requested from the backend, decorations excluded.
        frame: Rect,
    },
    /// The window was already tiled in the requested direction.
    Unchanged { position: Position },
}

/// Tiles the focused window as if `direction` had been pressed with the
/// snap modifier held.
///
/// # Errors
///
/// Returns an error if there is no focused window, no monitor, or the backend
/// fails. Classification and transition themselves never fail.
pub fn move_command<B: DisplayBackend + ?Sized>(
    backend: &B,
    direction: Direction,
) -> TilingResult<MoveOutcome> {
    let geometry = backend.focused_window()?;
    let monitors = backend.monitors()?;
    let monitor = active_monitor(&monitors, &geometry.frame).ok_or(TilingError::NoMonitors)?;
    let screen = Screen::new(monitor);

    let position = classify(&geometry.frame, &screen);
    let Some(target) = next_position(position, direction) else {
        tracing::debug!("tiling: already {position}, ignoring {direction}");
        return Ok(MoveOutcome::Unchanged { position });
    };

    let region = target.frame(&screen);

    // Decorations are measured after unmaximizing, since a maximized window
    // may be drawn without borders.
    backend.unmaximize()?;
    let insets = backend.focused_window()?.decoration_insets();
    let frame = insets.shrink(region);

    tracing::debug!("tiling: {position} + {direction} -> {target} at {frame} on {monitor}");
    backend.move_resize(frame)?;

    Ok(MoveOutcome::Moved { from: position, target, region, frame })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::backend::{BackendCall, MemoryBackend};

    fn hd() -> Rect { Rect::new(0, 0, 1920, 1080) }

    #[test]
    fn test_untiled_window_moves_to_left_half() {
        let backend =
            MemoryBackend::new(vec![hd()]).with_focused_frame(Rect::new(300, 200, 800, 600));

        let outcome = move_command(&backend, Direction::Left).unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: Position::Untiled,
                target: Target::Half(Direction::Left),
                region: Rect::new(0, 0, 960, 1080),
                frame: Rect::new(0, 0, 960, 1080),
            }
        );
        assert_eq!(backend.calls(), vec![
            BackendCall::Unmaximize,
            BackendCall::MoveResize(Rect::new(0, 0, 960, 1080)),
        ]);
    }

    #[test]
    fn test_repeated_direction_issues_no_calls() {
        let backend =
            MemoryBackend::new(vec![hd()]).with_focused_frame(Rect::new(0, 0, 960, 1080));

        let outcome = move_command(&backend, Direction::Left).unwrap();

        assert_eq!(outcome, MoveOutcome::Unchanged { position: Position::Half(Direction::Left) });
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_mirror_direction_maximises() {
        let backend =
            MemoryBackend::new(vec![hd()]).with_focused_frame(Rect::new(0, 0, 960, 1080));

        let outcome = move_command(&backend, Direction::Right).unwrap();

        assert!(matches!(outcome, MoveOutcome::Moved { target: Target::Full, .. }));
        assert_eq!(backend.moves(), vec![hd()]);
    }

    #[test]
    fn test_decorations_are_subtracted() {
        let backend = MemoryBackend::new(vec![hd()])
            .with_insets(Insets::new(4, 30))
            .with_focused_frame(Rect::new(300, 200, 800, 600));

        move_command(&backend, Direction::Left).unwrap();

        assert_eq!(backend.moves(), vec![Rect::new(2, 28, 956, 1050)]);
        // The decorated frame lands exactly on the half, so it classifies as tiled.
        assert_eq!(backend.focused().unwrap().frame, Rect::new(0, 0, 960, 1080));
    }

    #[test]
    fn test_uses_monitor_showing_most_of_the_window() {
        let second = Rect::new(1920, 0, 2560, 1440);
        let backend = MemoryBackend::new(vec![hd(), second])
            .with_focused_frame(Rect::new(1900, 100, 1000, 800));

        move_command(&backend, Direction::Right).unwrap();

        assert_eq!(backend.moves(), vec![Rect::new(3200, 0, 1280, 1440)]);
    }

    #[test]
    fn test_no_focused_window_is_an_error() {
        let backend = MemoryBackend::new(vec![hd()]);
        assert_eq!(move_command(&backend, Direction::Up), Err(TilingError::NoFocusedWindow));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_no_monitors_is_an_error() {
        let backend = MemoryBackend::new(vec![]).with_focused_frame(Rect::new(0, 0, 10, 10));
        assert_eq!(move_command(&backend, Direction::Up), Err(TilingError::NoMonitors));
    }

    #[test]
    fn test_backend_failure_is_propagated() {
        let backend = MemoryBackend::new(vec![hd()]).with_focused_frame(Rect::new(0, 0, 10, 10));
        backend.set_failure(Some("BadWindow"));
        assert!(matches!(move_command(&backend, Direction::Up), Err(TilingError::Backend(_))));
    }

    #[test]
    fn test_unmaximizes_before_moving() {
        let backend = MemoryBackend::new(vec![hd()]).with_focused_frame(Rect::new(10, 10, 10, 10));
        backend.set_maximized(true);

        move_command(&backend, Direction::Down).unwrap();

        assert!(!backend.is_maximized());
        assert_eq!(backend.calls().first(), Some(&BackendCall::Unmaximize));
    }
}
