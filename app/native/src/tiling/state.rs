//! Core value types for the tiling state machine.
//!
//! These types describe where a window sits on a screen:
//! - `Direction` names one half of a screen
//! - `Corner` names one quarter (two non-opposite directions)
//! - `Position` is the classification of a window's live geometry
//!
//! Geometry is integer pixels with a top-left origin, matching what the
//! display server reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Direction
// ============================================================================

/// One of the four snap directions.
///
/// Variants are declared in lexical order of their names. The derived `Ord`
/// is the total order used to canonicalize corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Left,
    Right,
    Up,
}

impl Direction {
    /// All directions, in the order halves are enumerated on a screen.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the mirror direction (left/right, up/down).
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Returns the lowercase wire name of this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Whether this direction splits the screen along the x axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool { matches!(self, Self::Left | Self::Right) }

    /// Position of this direction in [`Direction::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Up => 2,
            Self::Down => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Error returned when a string is not a direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction '{0}', expected one of: left, right, up, down")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

// ============================================================================
// Corner
// ============================================================================

/// An unordered pair of two non-opposite directions, i.e. a screen quadrant.
///
/// The pair is stored sorted, so `Corner::new(Up, Left)` and
/// `Corner::new(Left, Up)` are the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Corner {
    first: Direction,
    second: Direction,
}

impl Corner {
    pub const UP_LEFT: Self = Self { first: Direction::Left, second: Direction::Up };
    pub const UP_RIGHT: Self = Self { first: Direction::Right, second: Direction::Up };
    pub const DOWN_LEFT: Self = Self { first: Direction::Down, second: Direction::Left };
    pub const DOWN_RIGHT: Self = Self { first: Direction::Down, second: Direction::Right };

    /// All corners, in the order quarters are enumerated on a screen.
    pub const ALL: [Self; 4] = [Self::UP_LEFT, Self::UP_RIGHT, Self::DOWN_LEFT, Self::DOWN_RIGHT];

    /// Builds the corner shared by two directions.
    ///
    /// Returns `None` when the directions are equal or opposite, since those
    /// pairs do not describe a quadrant.
    #[must_use]
    pub fn new(a: Direction, b: Direction) -> Option<Self> {
        if a == b || a.opposite() == b {
            return None;
        }
        Some(Self::spanning(a, b))
    }

    /// Builds the corner between two directions on different axes.
    pub(super) fn spanning(a: Direction, b: Direction) -> Self {
        debug_assert_ne!(a.is_horizontal(), b.is_horizontal(), "{a} and {b} share an axis");
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Self { first, second }
    }

    /// Returns both directions in canonical order.
    #[must_use]
    pub const fn directions(self) -> (Direction, Direction) { (self.first, self.second) }

    /// Whether `direction` is one of the two sides of this corner.
    #[must_use]
    pub fn contains(self, direction: Direction) -> bool {
        self.first == direction || self.second == direction
    }

    /// The horizontal side of this corner (left or right).
    #[must_use]
    pub const fn horizontal(self) -> Direction {
        if self.first.is_horizontal() { self.first } else { self.second }
    }

    /// The vertical side of this corner (up or down).
    #[must_use]
    pub const fn vertical(self) -> Direction {
        if self.first.is_horizontal() { self.second } else { self.first }
    }

    /// Position of this corner in [`Corner::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        let row = if matches!(self.vertical(), Direction::Down) { 2 } else { 0 };
        let column = if matches!(self.horizontal(), Direction::Right) { 1 } else { 0 };
        row + column
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vertical(), self.horizontal())
    }
}

// ============================================================================
// Position
// ============================================================================

/// Where a window currently sits, derived from its live geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// Not tiled to any known half or quarter.
    #[default]
    Untiled,
    /// Tiled to half of the screen.
    Half(Direction),
    /// Tiled to a quarter of the screen.
    Quarter(Corner),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untiled => f.write_str("untiled"),
            Self::Half(direction) => write!(f, "half:{direction}"),
            Self::Quarter(corner) => write!(f, "quarter:{corner}"),
        }
    }
}

// ============================================================================
// Geometry Types
// ============================================================================

/// A point in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

/// A width and height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }
}

/// A rectangle with position and size, origin top-left.
///
/// Used both for a monitor's usable area and a window's bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from an anchor point and a size.
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    #[must_use]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }

    /// Check if this rectangle has positive dimensions.
    #[must_use]
    pub const fn is_valid(&self) -> bool { self.width > 0 && self.height > 0 }

    /// Calculate the area of this rectangle.
    #[must_use]
    pub const fn area(&self) -> i64 { self.width as i64 * self.height as i64 }

    /// Area of the intersection with another rectangle, zero if disjoint.
    #[must_use]
    pub fn overlap_area(&self, other: &Self) -> i64 {
        let width = i64::from((self.x + self.width).min(other.x + other.width))
            - i64::from(self.x.max(other.x));
        let height = i64::from((self.y + self.height).min(other.y + other.height))
            - i64::from(self.y.max(other.y));
        width.max(0) * height.max(0)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Extra pixels contributed by window decorations (borders, title bar).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    pub width: i32,
    pub height: i32,
}

impl Insets {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self { Self { width, height } }

    /// Horizontal border thickness on each side.
    #[must_use]
    pub const fn border(&self) -> i32 { self.width.div_euclid(2) }

    /// Shrinks a target region so the visible window, not window plus
    /// decorations, fills it.
    ///
    /// Only the top edge carries a title bar, so the vertical offset is the
    /// full inset height minus one border.
    #[must_use]
    pub const fn shrink(&self, target: Rect) -> Rect {
        let border = self.border();
        Rect::new(
            target.x + border,
            target.y + self.height - border,
            target.width - self.width,
            target.height - self.height,
        )
    }

    /// Inverse of [`Self::shrink`]: the decorated frame around a window rect.
    #[must_use]
    pub const fn expand(&self, window: Rect) -> Rect {
        let border = self.border();
        Rect::new(
            window.x - border,
            window.y - (self.height - border),
            window.width + self.width,
            window.height + self.height,
        )
    }
}
