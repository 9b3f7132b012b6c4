//! Directional transition engine.
//!
//! Given where a window sits and which arrow was pressed, decides where it
//! goes next. Repeated presses cycle through halves, quarters and full screen
//! the way snap-assist does.

use std::fmt;

use super::screen::Screen;
use super::state::{Corner, Direction, Position, Rect};

/// The tiling a window should be moved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// Half of the screen.
    Half(Direction),
    /// A quarter of the screen.
    Quarter(Corner),
    /// The whole screen.
    Full,
}

impl Target {
    /// Resolves this target to a rectangle on `screen`, before decorations.
    #[must_use]
    pub fn frame(self, screen: &Screen) -> Rect {
        match self {
            Self::Half(direction) => screen.half(direction),
            Self::Quarter(corner) => screen.quarter(corner),
            Self::Full => screen.frame(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Half(direction) => write!(f, "half:{direction}"),
            Self::Quarter(corner) => write!(f, "quarter:{corner}"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Maps a press while in a quarter to the half it leads to.
///
/// Pressing the axis-opposite of one side of the corner moves to the half on
/// the corner's other side. Any other press passes through unchanged.
#[must_use]
pub const fn corner_exit(corner: Corner, requested: Direction) -> Direction {
    use Direction::{Down, Left, Right, Up};

    match (corner.vertical(), corner.horizontal(), requested) {
        (Up, Left, Down) | (Down, Left, Up) => Left,
        (Up, Right, Down) | (Down, Right, Up) => Right,
        (Up, Left, Right) | (Up, Right, Left) => Up,
        (Down, Left, Right) | (Down, Right, Left) => Down,
        _ => requested,
    }
}

/// Computes the next tiling for a window at `current` when `requested` is
/// pressed.
///
/// Returns `None` when the window is already tiled to `requested`; no move
/// should be issued at all in that case.
#[must_use]
pub fn next_position(current: Position, requested: Direction) -> Option<Target> {
    match current {
        Position::Untiled => Some(Target::Half(requested)),
        Position::Half(direction) if direction == requested => None,
        Position::Half(direction) if direction == requested.opposite() => Some(Target::Full),
        Position::Quarter(corner) => Some(Target::Half(corner_exit(corner, requested))),
        Position::Half(direction) => Some(Target::Quarter(Corner::spanning(direction, requested))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_POSITIONS: [Position; 9] = [
        Position::Untiled,
        Position::Half(Direction::Left),
        Position::Half(Direction::Right),
        Position::Half(Direction::Up),
        Position::Half(Direction::Down),
        Position::Quarter(Corner::UP_LEFT),
        Position::Quarter(Corner::UP_RIGHT),
        Position::Quarter(Corner::DOWN_LEFT),
        Position::Quarter(Corner::DOWN_RIGHT),
    ];

    #[test]
    fn test_untiled_snaps_to_requested_half() {
        for direction in Direction::ALL {
            assert_eq!(
                next_position(Position::Untiled, direction),
                Some(Target::Half(direction))
            );
        }
    }

    #[test]
    fn test_same_direction_is_no_move() {
        for direction in Direction::ALL {
            assert_eq!(next_position(Position::Half(direction), direction), None);
        }
    }

    #[test]
    fn test_only_same_direction_produces_no_move() {
        for position in ALL_POSITIONS {
            for direction in Direction::ALL {
                let expected_none = position == Position::Half(direction);
                assert_eq!(next_position(position, direction).is_none(), expected_none);
            }
        }
    }

    #[test]
    fn test_mirror_direction_maximises() {
        for direction in Direction::ALL {
            assert_eq!(
                next_position(Position::Half(direction), direction.opposite()),
                Some(Target::Full)
            );
        }
    }

    #[test]
    fn test_half_plus_orthogonal_enters_quarter() {
        assert_eq!(
            next_position(Position::Half(Direction::Left), Direction::Up),
            Some(Target::Quarter(Corner::UP_LEFT))
        );
        assert_eq!(
            next_position(Position::Half(Direction::Up), Direction::Left),
            Some(Target::Quarter(Corner::UP_LEFT))
        );
        assert_eq!(
            next_position(Position::Half(Direction::Right), Direction::Down),
            Some(Target::Quarter(Corner::DOWN_RIGHT))
        );
        assert_eq!(
            next_position(Position::Half(Direction::Down), Direction::Left),
            Some(Target::Quarter(Corner::DOWN_LEFT))
        );
    }

    #[test]
    fn test_every_orthogonal_press_from_a_half_moves() {
        for half in Direction::ALL {
            let orthogonal = |d: &Direction| d.is_horizontal() != half.is_horizontal();
            for pressed in Direction::ALL.into_iter().filter(orthogonal) {
                match next_position(Position::Half(half), pressed) {
                    Some(Target::Quarter(corner)) => {
                        assert!(corner.contains(half) && corner.contains(pressed));
                    }
                    other => panic!("{half} + {pressed} gave {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_corner_exit_table() {
        use Direction::{Down, Left, Right, Up};

        let table = [
            (Corner::UP_LEFT, [(Down, Left), (Right, Up), (Up, Up), (Left, Left)]),
            (Corner::UP_RIGHT, [(Down, Right), (Left, Up), (Up, Up), (Right, Right)]),
            (Corner::DOWN_LEFT, [(Up, Left), (Right, Down), (Down, Down), (Left, Left)]),
            (Corner::DOWN_RIGHT, [(Up, Right), (Left, Down), (Down, Down), (Right, Right)]),
        ];

        for (corner, presses) in table {
            for (pressed, expected) in presses {
                assert_eq!(corner_exit(corner, pressed), expected, "{corner} + {pressed}");
                assert_eq!(
                    next_position(Position::Quarter(corner), pressed),
                    Some(Target::Half(expected))
                );
            }
        }
    }

    #[test]
    fn test_corner_cycle() {
        let first = next_position(Position::Untiled, Direction::Left);
        assert_eq!(first, Some(Target::Half(Direction::Left)));

        let second = next_position(Position::Half(Direction::Left), Direction::Up);
        assert_eq!(second, Some(Target::Quarter(Corner::UP_LEFT)));

        let quarter = Position::Quarter(Corner::UP_LEFT);
        assert_eq!(next_position(quarter, Direction::Down), Some(Target::Half(Direction::Left)));
        assert_eq!(next_position(quarter, Direction::Right), Some(Target::Half(Direction::Up)));
    }

    #[test]
    fn test_total_over_every_input() {
        for position in ALL_POSITIONS {
            for direction in Direction::ALL {
                // Must not panic, and a quarter is only ever reached from a half.
                if let Some(Target::Quarter(_)) = next_position(position, direction) {
                    assert!(matches!(position, Position::Half(_)));
                }
            }
        }
    }

    #[test]
    fn test_target_frames() {
        let screen = Screen::new(Rect::new(0, 0, 1920, 1080));
        assert_eq!(Target::Full.frame(&screen), Rect::new(0, 0, 1920, 1080));
        assert_eq!(Target::Half(Direction::Left).frame(&screen), Rect::new(0, 0, 960, 1080));
        assert_eq!(
            Target::Quarter(Corner::DOWN_RIGHT).frame(&screen),
            Rect::new(960, 540, 960, 540)
        );
    }
}
