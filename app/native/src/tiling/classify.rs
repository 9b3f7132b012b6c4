//! Classification of a window's live geometry into a tiling position.

use super::screen::Screen;
use super::state::{Position, Rect};

/// Determines whether `window` is tiled to a half or a quarter of `screen`.
///
/// Only an exact pixel match counts. A window that is one pixel off any known
/// tiling (for example after decoration rounding) is untiled.
#[must_use]
pub fn classify(window: &Rect, screen: &Screen) -> Position {
    let origin = window.origin();
    let size = window.size();
    screen
        .positions()
        .find(|(_, anchor, region_size)| *anchor == origin && *region_size == size)
        .map_or(Position::Untiled, |(position, _, _)| position)
}
