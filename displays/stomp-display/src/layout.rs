//! Screen geometry
//!
//! All setup screens share one layout on the 240x135 landscape panel: a
//! "setup" header flanked by two lines, a value box on the left, a
//! sectioned bar on the right and a caption between two corner triangles.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

pub const SCREEN_WIDTH: i32 = 240;
pub const SCREEN_HEIGHT: i32 = 135;

// Corner triangles
pub const TRI_SIDE: i32 = 20;
pub const TRI_MARGIN_L: i32 = 7;
pub const TRI_MARGIN_R: i32 = 7;
pub const TRI_Y: i32 = 117;

// Header
pub const HEADER_TEXT: &str = "setup";
pub const HEADER_Y: i32 = 20;
pub const LINE_Y: i32 = 13;
pub const LINE_THICKNESS: u32 = 2;
pub const LINE_MARGIN_X: i32 = 10;
pub const LINE_LENGTH: u32 = 50;

// Value bar
pub const BAR_X: i32 = 64;
pub const BAR_Y: i32 = 50;
pub const BAR_WIDTH: u32 = 164;
pub const BAR_HEIGHT: u32 = 24;
pub const LED_SECTIONS: u32 = 4;
pub const BATTERY_SECTIONS: u32 = 5;

// Text rows
pub const VALUE_X: i32 = 10;
pub const VALUE_Y: i32 = 70;
pub const LABEL_Y: i32 = 54;
pub const ROW_VALUE_Y: i32 = 90;
pub const BIG_VALUE_Y: i32 = 80;
pub const CAPTION_Y: i32 = 126;

/// Lowest row the content area may start at, below the header lines
pub const MIN_CONTENT_TOP: i32 = LINE_Y + LINE_THICKNESS as i32 + 2;

const HALF_TRI: i32 = TRI_SIDE / 2;

/// Full-width band holding the triangles
pub const fn triangle_strip() -> Rectangle {
    Rectangle::new(
        Point::new(0, TRI_Y - HALF_TRI - 2),
        Size::new(SCREEN_WIDTH as u32, (TRI_SIDE + 4) as u32),
    )
}

/// Left triangle, pointing left
pub const fn left_triangle() -> [Point; 3] {
    [
        Point::new(TRI_MARGIN_L, TRI_Y),
        Point::new(TRI_MARGIN_L + TRI_SIDE, TRI_Y - HALF_TRI),
        Point::new(TRI_MARGIN_L + TRI_SIDE, TRI_Y + HALF_TRI),
    ]
}

/// Right triangle, pointing right
pub const fn right_triangle() -> [Point; 3] {
    [
        Point::new(SCREEN_WIDTH - TRI_MARGIN_R, TRI_Y),
        Point::new(SCREEN_WIDTH - TRI_MARGIN_R - TRI_SIDE, TRI_Y - HALF_TRI),
        Point::new(SCREEN_WIDTH - TRI_MARGIN_R - TRI_SIDE, TRI_Y + HALF_TRI),
    ]
}

/// Horizontal strip between the triangles' inner edges for rows `y_top..=y_bottom`
///
/// Stops just short of each triangle's inner edge. Rows are clipped to the
/// screen; an empty or inverted range yields `None`.
pub fn band_between_triangles(y_top: i32, y_bottom: i32) -> Option<Rectangle> {
    if y_bottom < y_top {
        return None;
    }

    let inner_left = TRI_MARGIN_L + TRI_SIDE;
    let inner_right = SCREEN_WIDTH - TRI_MARGIN_R - TRI_SIDE;
    let x = inner_left + 1;
    let width = (inner_right - 1) - x + 1;
    if width <= 0 {
        return None;
    }

    let top = y_top.max(0);
    let bottom = y_bottom.min(SCREEN_HEIGHT - 1);
    if bottom < top {
        return None;
    }

    Some(Rectangle::new(
        Point::new(x, top),
        Size::new(width as u32, (bottom - top + 1) as u32),
    ))
}

/// Bar outline
pub const fn bar_frame() -> Rectangle {
    Rectangle::new(Point::new(BAR_X, BAR_Y), Size::new(BAR_WIDTH, BAR_HEIGHT))
}

/// Bar area inside the outline
pub const fn bar_interior() -> Rectangle {
    Rectangle::new(
        Point::new(BAR_X + 1, BAR_Y + 1),
        Size::new(BAR_WIDTH - 2, BAR_HEIGHT - 2),
    )
}

/// Filled interior columns for `value` out of `full`
///
/// The bar fills from the right edge leftwards.
pub const fn bar_columns(value: u32, full: u32) -> u32 {
    if full == 0 {
        return 0;
    }
    let value = if value > full { full } else { value };
    (BAR_WIDTH - 2) * value / full
}

/// Screen x of filled column `column`, counted from the right edge
pub const fn bar_column_x(column: u32) -> i32 {
    BAR_X + 1 + (BAR_WIDTH - 2) as i32 - 1 - column as i32
}

/// Divider positions for a bar split into `sections`
pub fn bar_dividers(sections: u32) -> impl Iterator<Item = i32> {
    (1..sections).map(move |i| BAR_X + (BAR_WIDTH * i / sections) as i32)
}

/// Horizontal centre of slot `slot` when the width is split into `count` slots
pub const fn slot_center(slot: u32, count: u32) -> i32 {
    SCREEN_WIDTH * (2 * slot as i32 + 1) / (2 * count as i32)
}
