//! RAM framebuffer with per-pixel change detection.
//!
//! Segment views draw into this buffer instead of the display. After drawing,
//! only the rectangle containing changed pixels is flushed to the real target
//! in a single `fill_contiguous` call. The buffer can also be read back pixel
//! by pixel, which is how rendering is verified off-device.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Heap-allocated framebuffer implementing `DrawTarget<Color = Rgb565>`.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a framebuffer of `size` filled with black pixels.
    pub fn new(size: Size) -> Self {
        let width = size.width as usize;
        let height = size.height as usize;

        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Colour at `point`, or `None` outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        let (x, y) = self.index_of(point.x, point.y)?;
        Some(self.pixels[y * self.width + x])
    }

    /// Bounding rectangle of pixels changed since the last flush.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(DirtyRect::to_rectangle)
    }

    fn index_of(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Write a single pixel, expanding the dirty rect only if the colour changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Flush the dirty region to `display`, then reset the dirty state.
    ///
    /// If nothing changed, this is a no-op.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };

        let area = rect.to_rectangle();
        let width = area.size.width as usize;

        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let pixel_iter = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let row_start = y * stride + rect.min_x;
            pixels[row_start..row_start + width].iter().copied()
        });

        display.fill_contiguous(&area, pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some((x, y)) = self.index_of(coord.x, coord.y) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::Drawable;
    use embedded_graphics::primitives::{Primitive, PrimitiveStyle};

    #[test]
    fn test_new_buffer_is_black_and_clean() {
        let buffer = FrameBuffer::new(Size::new(8, 4));

        assert_eq!(buffer.size(), Size::new(8, 4));
        assert_eq!(buffer.pixel(Point::new(7, 3)), Some(Rgb565::BLACK));
        assert_eq!(buffer.pixel(Point::new(8, 0)), None);
        assert_eq!(buffer.pixel(Point::new(-1, 0)), None);
        assert!(buffer.dirty_area().is_none());
    }

    #[test]
    fn test_fill_tracks_dirty_area() {
        let mut buffer = FrameBuffer::new(Size::new(20, 10));
        Rectangle::new(Point::new(2, 3), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut buffer)
            .unwrap();

        assert_eq!(buffer.pixel(Point::new(5, 4)), Some(Rgb565::WHITE));
        assert_eq!(buffer.pixel(Point::new(6, 4)), Some(Rgb565::BLACK));
        assert_eq!(
            buffer.dirty_area(),
            Some(Rectangle::new(Point::new(2, 3), Size::new(4, 2)))
        );
    }

    #[test]
    fn test_unchanged_pixels_do_not_dirty() {
        let mut buffer = FrameBuffer::new(Size::new(4, 4));
        buffer.clear(Rgb565::BLACK).unwrap();

        assert!(buffer.dirty_area().is_none());
    }

    #[test]
    fn test_fill_is_clipped_to_buffer() {
        let mut buffer = FrameBuffer::new(Size::new(4, 4));
        let area = Rectangle::new(Point::new(-2, 2), Size::new(10, 10));
        buffer.fill_solid(&area, Rgb565::RED).unwrap();

        assert_eq!(buffer.pixel(Point::new(0, 2)), Some(Rgb565::RED));
        assert_eq!(buffer.pixel(Point::new(3, 3)), Some(Rgb565::RED));
        assert_eq!(buffer.pixel(Point::new(0, 1)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_flush_copies_dirty_region_once() {
        let mut buffer = FrameBuffer::new(Size::new(6, 6));
        let mut target = FrameBuffer::new(Size::new(6, 6));
        let area = Rectangle::new(Point::new(1, 1), Size::new(2, 2));
        buffer.fill_solid(&area, Rgb565::GREEN).unwrap();

        buffer.flush(&mut target).unwrap();

        assert_eq!(target.pixel(Point::new(2, 2)), Some(Rgb565::GREEN));
        assert_eq!(target.pixel(Point::new(3, 3)), Some(Rgb565::BLACK));
        assert!(buffer.dirty_area().is_none());
    }
}
