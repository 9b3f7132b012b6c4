//! Screen geometry model.
//!
//! A `Screen` is built from one monitor rectangle and precomputes the anchor
//! and size of every half and quarter on it. Monitors can have a non-zero
//! origin, since each one is an inset into a larger virtual screen space.

use super::state::{Corner, Direction, Point, Position, Rect, Size};

/// Anchor and size of one half of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HalfRegion {
    direction: Direction,
    anchor: Point,
    size: Size,
}

/// Anchor of one quarter of the screen. All quarters share one size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CornerRegion {
    corner: Corner,
    anchor: Point,
}

/// Tiling regions for a single monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    frame: Rect,
    halves: [HalfRegion; 4],
    corners: [CornerRegion; 4],
    quarter_size: Size,
}

impl Screen {
    /// Computes every tiling region for the given monitor rectangle.
    ///
    /// Odd dimensions round down, so the right and bottom halves start one
    /// pixel before the true midpoint would.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        let Rect { x, y, width, height } = frame;
        let half_width = width.div_euclid(2);
        let half_height = height.div_euclid(2);

        let half = |direction: Direction| {
            let (anchor, size) = match direction {
                Direction::Left => (Point::new(x, y), Size::new(half_width, height)),
                Direction::Right => (Point::new(x + half_width, y), Size::new(half_width, height)),
                Direction::Up => (Point::new(x, y), Size::new(width, half_height)),
                Direction::Down => (Point::new(x, y + half_height), Size::new(width, half_height)),
            };
            HalfRegion { direction, anchor, size }
        };

        let quarter = |corner: Corner| {
            let anchor_x = if corner.horizontal() == Direction::Left { x } else { x + half_width };
            let anchor_y = if corner.vertical() == Direction::Up { y } else { y + half_height };
            CornerRegion { corner, anchor: Point::new(anchor_x, anchor_y) }
        };

        Self {
            frame,
            halves: Direction::ALL.map(half),
            corners: Corner::ALL.map(quarter),
            quarter_size: Size::new(half_width, half_height),
        }
    }

    /// The full monitor rectangle.
    #[must_use]
    pub const fn frame(&self) -> Rect { self.frame }

    /// Top-left point of the half in `direction`.
    #[must_use]
    pub fn anchor(&self, direction: Direction) -> Point { self.half_region(direction).anchor }

    /// Size of the half in `direction`.
    #[must_use]
    pub fn half_size(&self, direction: Direction) -> Size { self.half_region(direction).size }

    /// Top-left point of the quarter at `corner`.
    #[must_use]
    pub const fn corner_anchor(&self, corner: Corner) -> Point {
        self.corners[corner.index()].anchor
    }

    /// Size shared by all four quarters.
    #[must_use]
    pub const fn quarter_size(&self) -> Size { self.quarter_size }

    /// Rectangle of the half in `direction`.
    #[must_use]
    pub fn half(&self, direction: Direction) -> Rect {
        let region = self.half_region(direction);
        Rect::from_parts(region.anchor, region.size)
    }

    /// Rectangle of the quarter at `corner`.
    #[must_use]
    pub fn quarter(&self, corner: Corner) -> Rect {
        Rect::from_parts(self.corner_anchor(corner), self.quarter_size)
    }

    /// Iterates over every known tiling: the four halves, then the four
    /// quarters, each with its anchor and size.
    pub fn positions(&self) -> impl Iterator<Item = (Position, Point, Size)> + '_ {
        let halves = self
            .halves
            .iter()
            .map(|region| (Position::Half(region.direction), region.anchor, region.size));
        let quarters = self
            .corners
            .iter()
            .map(|region| (Position::Quarter(region.corner), region.anchor, self.quarter_size));
        halves.chain(quarters)
    }

    // Both arrays are built from `ALL`, so `index()` addresses them directly.
    const fn half_region(&self, direction: Direction) -> HalfRegion {
        self.halves[direction.index()]
    }
}

/// Picks the monitor that displays the greatest portion of `window`.
///
/// Ties resolve to the first monitor in the list. Returns `None` only when
/// `monitors` is empty.
#[must_use]
pub fn active_monitor(monitors: &[Rect], window: &Rect) -> Option<Rect> {
    let mut best: Option<(Rect, i64)> = None;
    for monitor in monitors {
        let area = monitor.overlap_area(window);
        match best {
            Some((_, best_area)) if best_area >= area => {}
            _ => best = Some((*monitor, area)),
        }
    }
    best.map(|(monitor, _)| monitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hd() -> Screen { Screen::new(Rect::new(0, 0, 1920, 1080)) }

    #[test]
    fn test_half_anchors_and_sizes() {
        let screen = hd();
        assert_eq!(screen.half(Direction::Left), Rect::new(0, 0, 960, 1080));
        assert_eq!(screen.half(Direction::Right), Rect::new(960, 0, 960, 1080));
        assert_eq!(screen.half(Direction::Up), Rect::new(0, 0, 1920, 540));
        assert_eq!(screen.half(Direction::Down), Rect::new(0, 540, 1920, 540));
    }

    #[test]
    fn test_quarter_anchors_share_size() {
        let screen = hd();
        assert_eq!(screen.quarter_size(), Size::new(960, 540));
        assert_eq!(screen.corner_anchor(Corner::UP_LEFT), Point::new(0, 0));
        assert_eq!(screen.corner_anchor(Corner::UP_RIGHT), Point::new(960, 0));
        assert_eq!(screen.corner_anchor(Corner::DOWN_LEFT), Point::new(0, 540));
        assert_eq!(screen.corner_anchor(Corner::DOWN_RIGHT), Point::new(960, 540));
    }

    #[test]
    fn test_offset_monitor_shifts_every_anchor() {
        let screen = Screen::new(Rect::new(1920, 200, 1280, 1024));
        assert_eq!(screen.anchor(Direction::Left), Point::new(1920, 200));
        assert_eq!(screen.anchor(Direction::Right), Point::new(2560, 200));
        assert_eq!(screen.anchor(Direction::Down), Point::new(1920, 712));
        assert_eq!(screen.corner_anchor(Corner::DOWN_RIGHT), Point::new(2560, 712));
    }

    #[test]
    fn test_odd_dimensions_round_down() {
        let screen = Screen::new(Rect::new(0, 0, 1921, 1081));
        assert_eq!(screen.half_size(Direction::Left), Size::new(960, 1081));
        assert_eq!(screen.half_size(Direction::Up), Size::new(1921, 540));
        assert_eq!(screen.anchor(Direction::Right), Point::new(960, 0));
        assert_eq!(screen.quarter_size(), Size::new(960, 540));
    }

    #[test]
    fn test_halves_cover_each_axis() {
        for (width, height) in [(1920, 1080), (1921, 1081), (5, 7), (2560, 1439)] {
            let screen = Screen::new(Rect::new(0, 0, width, height));
            let horizontal =
                screen.half_size(Direction::Left).width + screen.half_size(Direction::Right).width;
            let vertical =
                screen.half_size(Direction::Up).height + screen.half_size(Direction::Down).height;
            assert!((width - horizontal).abs() <= 1);
            assert!((height - vertical).abs() <= 1);
            assert_eq!(screen.half_size(Direction::Left).height, height);
            assert_eq!(screen.half_size(Direction::Up).width, width);
        }
    }

    #[test]
    fn test_quarters_partition_the_screen() {
        for (width, height) in [(1920, 1080), (1921, 1081), (800, 601)] {
            let frame = Rect::new(0, 0, width, height);
            let screen = Screen::new(frame);
            let total: i64 = Corner::ALL.iter().map(|corner| screen.quarter(*corner).area()).sum();
            let slack = i64::from(width) + i64::from(height) + 1;
            assert!(frame.area() - total <= slack);
            assert!(total <= frame.area());

            // Quarters never overlap one another.
            for a in Corner::ALL {
                for b in Corner::ALL {
                    if a != b {
                        assert_eq!(screen.quarter(a).overlap_area(&screen.quarter(b)), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_positions_enumerates_halves_then_quarters() {
        let screen = hd();
        let positions: Vec<Position> =
            screen.positions().map(|(position, _, _)| position).collect();
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[0], Position::Half(Direction::Left));
        assert_eq!(positions[3], Position::Half(Direction::Down));
        assert_eq!(positions[4], Position::Quarter(Corner::UP_LEFT));
        assert_eq!(positions[7], Position::Quarter(Corner::DOWN_RIGHT));
    }

    #[test]
    fn test_active_monitor_picks_largest_overlap() {
        let monitors = [Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 2560, 1440)];
        let window = Rect::new(1800, 100, 800, 600);
        assert_eq!(active_monitor(&monitors, &window), Some(monitors[1]));
    }

    #[test]
    fn test_active_monitor_ties_resolve_to_first() {
        let monitors = [Rect::new(0, 0, 1000, 1000), Rect::new(1000, 0, 1000, 1000)];
        let window = Rect::new(900, 0, 200, 100);
        assert_eq!(active_monitor(&monitors, &window), Some(monitors[0]));

        let offscreen = Rect::new(-5000, -5000, 10, 10);
        assert_eq!(active_monitor(&monitors, &offscreen), Some(monitors[0]));
    }

    #[test]
    fn test_active_monitor_empty_list() {
        assert_eq!(active_monitor(&[], &Rect::new(0, 0, 10, 10)), None);
    }
}
