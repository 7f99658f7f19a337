// src/ui/components/segment.rs
//! A single selectable segment of a segment view

use crate::ui::core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::geometry::Frame;
use crate::ui::styling::style::clamp_non_negative;
use crate::ui::styling::{SegmentStyle, TitleFont};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::debug;

/// Maximum title length in bytes; longer titles are truncated at a character boundary
pub const MAX_TITLE_LEN: usize = 32;

/// Raw RGB565 image shown inside a segment
pub type SegmentImage = ImageRaw<'static, Rgb565>;

/// Pixel placement of a segment's image and title
///
/// Coordinates are in the same space as the segment frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentContent {
    /// Area the current-state image is drawn into
    pub image: Option<Rectangle>,
    /// Top-left corner of the title text
    pub title: Option<Point>,
}

/// A single selectable segment
///
/// Segments are created by their [`SegmentView`](crate::ui::SegmentView)
/// and never stand alone. The view assigns the frame, broadcasts style
/// changes and owns the single-selection rule; a segment only tracks its own
/// flag and reports presses as [`Action::SegmentActivated`].
///
/// # Visual Features
/// - Background in the on/off selection colour
/// - Optional image per selection state, left of the title
/// - Title in the on/off selection text colour
/// - Content clipped to the segment frame
pub struct Segment {
    index: usize,
    frame: Frame,
    title: Option<heapless::String<MAX_TITLE_LEN>>,
    on_selection_image: Option<SegmentImage>,
    off_selection_image: Option<SegmentImage>,
    selected: bool,
    style: SegmentStyle,
    dirty: bool,
}

impl Segment {
    pub(crate) fn new(
        index: usize,
        style: SegmentStyle,
        title: Option<&str>,
        on_selection_image: Option<SegmentImage>,
        off_selection_image: Option<SegmentImage>,
    ) -> Self {
        Self {
            index,
            frame: Frame::ZERO,
            title: title.map(truncate_title),
            on_selection_image,
            off_selection_image,
            selected: false,
            style,
            dirty: true,
        }
    }

    /// Position within the owning view
    pub fn index(&self) -> usize {
        self.index
    }

    /// Frame in the owning view's coordinate space
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn on_selection_image(&self) -> Option<&SegmentImage> {
        self.on_selection_image.as_ref()
    }

    pub fn off_selection_image(&self) -> Option<&SegmentImage> {
        self.off_selection_image.as_ref()
    }

    /// Image for the current selection state
    pub fn current_image(&self) -> Option<&SegmentImage> {
        if self.selected {
            self.on_selection_image.as_ref()
        } else {
            self.off_selection_image.as_ref()
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn style(&self) -> &SegmentStyle {
        &self.style
    }

    /// Background colour for the current selection state
    pub fn background_colour(&self) -> Rgb565 {
        self.style.background_colour(self.selected)
    }

    /// Title colour for the current selection state
    pub fn text_colour(&self) -> Rgb565 {
        self.style.text_colour(self.selected)
    }

    /// Set the selection flag and switch presentation.
    ///
    /// Only this segment changes; keeping a single selection across the
    /// view is the owner's job.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.dirty = true;
    }

    pub(crate) fn set_frame(&mut self, frame: Frame) {
        if self.frame != frame {
            self.frame = frame;
            self.dirty = true;
        }
    }

    pub fn set_separator_width(&mut self, width: f32) {
        self.style.separator_width = clamp_non_negative(width);
        self.dirty = true;
    }

    pub fn set_vertical_margin(&mut self, margin: f32) {
        self.style.vertical_margin = clamp_non_negative(margin);
        self.dirty = true;
    }

    pub fn set_on_selection_colour(&mut self, colour: Rgb565) {
        self.style.on_selection_colour = colour;
        self.dirty = true;
    }

    pub fn set_off_selection_colour(&mut self, colour: Rgb565) {
        self.style.off_selection_colour = colour;
        self.dirty = true;
    }

    pub fn set_on_selection_text_colour(&mut self, colour: Rgb565) {
        self.style.on_selection_text_colour = colour;
        self.dirty = true;
    }

    pub fn set_off_selection_text_colour(&mut self, colour: Rgb565) {
        self.style.off_selection_text_colour = colour;
        self.dirty = true;
    }

    pub fn set_title_font(&mut self, font: TitleFont) {
        self.style.title_font = font;
        self.dirty = true;
    }

    /// Replace the whole style snapshot.
    pub fn apply_style(&mut self, style: SegmentStyle) {
        self.style = style;
        self.dirty = true;
    }

    /// Area left for the image once the vertical margin is taken off the
    /// top and bottom of the frame.
    fn content_area(&self) -> Rectangle {
        let area = self.frame.to_rectangle();
        // Float to int casts saturate
        let margin = self.style.vertical_margin as u32;
        let height = area.size.height.saturating_sub(margin.saturating_mul(2));
        let top = area.top_left.y + ((area.size.height - height) / 2) as i32;

        Rectangle::new(
            Point::new(area.top_left.x, top),
            Size::new(area.size.width, height),
        )
    }

    /// Place the image and title as one row centred in the frame.
    ///
    /// The image is fitted to the content area height; the gap between image
    /// and title equals the vertical margin.
    pub fn content_layout(&self) -> SegmentContent {
        let area = self.frame.to_rectangle();
        let content = self.content_area();

        let image_size = self.current_image().map(|image| {
            let size = image.size();
            Size::new(
                size.width.min(content.size.width),
                size.height.min(content.size.height),
            )
        });
        let title_width = self
            .title()
            .map(|title| self.style.title_font.text_width(title));

        let gap = match (image_size, title_width) {
            (Some(_), Some(_)) => (self.style.vertical_margin as u32).min(area.size.width),
            _ => 0,
        };
        let row_width = image_size
            .map_or(0, |s| s.width)
            .saturating_add(gap)
            .saturating_add(title_width.unwrap_or(0));
        let left = area.top_left.x + (area.size.width as i32 - row_width as i32) / 2;

        let image = image_size.map(|size| {
            let top = content.top_left.y + (content.size.height as i32 - size.height as i32) / 2;
            Rectangle::new(Point::new(left, top), size)
        });

        let title = title_width.map(|_| {
            let text_left = left + image_size.map_or(0, |s| s.width) as i32 + gap as i32;
            let line_height = self.style.title_font.line_height() as i32;
            let top = area.top_left.y + (area.size.height as i32 - line_height) / 2;
            Point::new(text_left, top)
        });

        SegmentContent { image, title }
    }
}

/// Copy the whole characters of `title` that fit in [`MAX_TITLE_LEN`] bytes.
fn truncate_title(title: &str) -> heapless::String<MAX_TITLE_LEN> {
    let mut truncated = heapless::String::new();
    for c in title.chars() {
        if truncated.push(c).is_err() {
            debug!("Segment title truncated to {} bytes", MAX_TITLE_LEN);
            break;
        }
    }
    truncated
}

impl Drawable for Segment {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let area = self.frame.to_rectangle();

        area.into_styled(self.style.to_primitive_style(self.selected))
            .draw(display)?;

        let layout = self.content_layout();
        let mut clipped = display.clipped(&area);

        if let (Some(image), Some(image_area)) = (self.current_image(), layout.image) {
            Image::new(image, image_area.top_left).draw(&mut clipped.clipped(&image_area))?;
        }

        if let (Some(title), Some(origin)) = (self.title(), layout.title) {
            let text_style =
                MonoTextStyle::new(self.style.title_font.font(), self.text_colour());
            Text::with_baseline(title, origin, text_style, Baseline::Top).draw(&mut clipped)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.frame.to_rectangle()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            Some(DirtyRegion::new(self.bounds()))
        } else {
            None
        }
    }
}

/// Touch points are in the owning view's coordinate space.
impl Touchable for Segment {
    /// Hit-tests the drawn pixels, not the float frame.
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                // Selection happens on touch-down
                TouchResult::Action(Action::SegmentActivated(self.index))
            }
            TouchEvent::Drag(point) if self.contains_point(point) => TouchResult::Handled,
            _ => TouchResult::NotHandled,
        }
    }
}
