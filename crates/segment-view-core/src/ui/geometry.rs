// src/ui/geometry.rs
//! Float geometry for the layout engine
//!
//! Segment frames are computed in `f32` so that an extent which does not
//! divide evenly (301px across three segments) is represented exactly as the
//! layout algorithm produced it. Conversion to pixels happens only when
//! drawing, and snaps each *edge* independently: neighbouring frames that share
//! an edge in float space share it in pixel space too.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Rectangle};

/// Round a float coordinate to the nearest pixel (half away from zero).
pub fn snap(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/// Index of the pixel containing a float coordinate.
///
/// Pixel `i` covers `[i, i + 1)`.
pub fn pixel_of(value: f32) -> i32 {
    let truncated = value as i32;
    if (truncated as f32) > value {
        truncated - 1
    } else {
        truncated
    }
}

/// A point in float layout space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(snap(self.x), snap(self.y))
    }
}

/// Axis-aligned rectangle in float layout space
///
/// Origin is the top-left corner. Width and height are never negative when
/// produced by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const ZERO: Frame = Frame::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A frame of the given size at the origin.
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Snap to a pixel rectangle.
    pub fn to_rectangle(&self) -> Rectangle {
        let left = snap(self.x);
        let top = snap(self.y);
        let right = snap(self.max_x()).max(left);
        let bottom = snap(self.max_y()).max(top);

        Rectangle::new(
            Point::new(left, top),
            Size::new((right - left) as u32, (bottom - top) as u32),
        )
    }
}

impl From<Rectangle> for Frame {
    fn from(rect: Rectangle) -> Self {
        Self::new(
            rect.top_left.x as f32,
            rect.top_left.y as f32,
            rect.size.width as f32,
            rect.size.height as f32,
        )
    }
}

/// A divider line between two adjacent segments
///
/// Coordinates are local to the owning segment view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorLine {
    pub start: Position,
    pub end: Position,
}

impl SeparatorLine {
    /// Vertical line at `x` spanning `0..height` (horizontal organise mode).
    pub fn vertical(x: f32, height: f32) -> Self {
        Self {
            start: Position::new(x, 0.0),
            end: Position::new(x, height),
        }
    }

    /// Horizontal line at `y` spanning `0..width` (vertical organise mode).
    pub fn horizontal(y: f32, width: f32) -> Self {
        Self {
            start: Position::new(0.0, y),
            end: Position::new(width, y),
        }
    }

    /// Pixel line through the pixels containing the float endpoints.
    pub fn to_line(&self) -> Line {
        Line::new(
            Point::new(pixel_of(self.start.x), pixel_of(self.start.y)),
            Point::new(pixel_of(self.end.x), pixel_of(self.end.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_half_away_from_zero() {
        assert_eq!(snap(99.666), 100);
        assert_eq!(snap(100.4), 100);
        assert_eq!(snap(0.5), 1);
        assert_eq!(snap(-0.5), -1);
        assert_eq!(snap(-1.2), -1);
    }

    #[test]
    fn test_pixel_of_floors() {
        assert_eq!(pixel_of(100.5), 100);
        assert_eq!(pixel_of(100.0), 100);
        assert_eq!(pixel_of(-0.25), -1);
    }

    #[test]
    fn test_adjacent_frames_share_pixel_edges() {
        let width = (301.0 - 2.0) / 3.0;
        let first = Frame::new(0.0, 0.0, width, 40.0).to_rectangle();
        let second = Frame::new(width + 1.0, 0.0, width, 40.0).to_rectangle();
        let third = Frame::new(2.0 * (width + 1.0), 0.0, width, 40.0).to_rectangle();

        // One pixel column left for each separator, nothing lost at the end.
        assert_eq!(first.top_left.x + first.size.width as i32 + 1, second.top_left.x);
        assert_eq!(second.top_left.x + second.size.width as i32 + 1, third.top_left.x);
        assert_eq!(third.top_left.x + third.size.width as i32, 301);
    }

    #[test]
    fn test_origin_snaps_like_rectangle() {
        let frame = Frame::new(10.5, 4.4, 20.0, 5.0);
        assert_eq!(frame.origin().to_point(), frame.to_rectangle().top_left);
    }

    #[test]
    fn test_frame_from_rectangle() {
        let frame = Frame::from(Rectangle::new(Point::new(4, 8), Size::new(100, 30)));
        assert_eq!(frame, Frame::new(4.0, 8.0, 100.0, 30.0));
    }

    #[test]
    fn test_separator_line_snaps_to_pixels() {
        let line = SeparatorLine::vertical(100.166, 40.0).to_line();
        assert_eq!(line.start, Point::new(100, 0));
        assert_eq!(line.end, Point::new(100, 40));
    }

    #[test]
    fn test_separator_line_lands_in_gap_pixel() {
        // Segments 0..100 and 101..201 leave pixel 100 free
        let line = SeparatorLine::horizontal(100.5, 60.0).to_line();
        assert_eq!(line.start, Point::new(0, 100));
        assert_eq!(line.end, Point::new(60, 100));
    }
}
