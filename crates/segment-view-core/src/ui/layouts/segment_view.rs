// src/ui/layouts/segment_view.rs
//! Segment view: a strip of mutually-exclusive segments
//!
//! The view owns its segments, lays them out along one axis, draws the
//! separators between them and keeps at most one of them selected.
//!
//! # Layout
//!
//! With extent `E` along the primary axis, separator thickness `S` and `N`
//! segments, every segment gets `(E - S * (N - 1)) / N` along the primary
//! axis and the full container extent across it. Segments are placed from 0
//! with a gap of `S` between neighbours. A single segment fills the whole
//! view and ignores `S`.
//!
//! Frames stay in `f32` and the remainder of an uneven division is not
//! redistributed; pixel snapping happens per edge when drawing.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::SegmentProperties;
use crate::error::SegmentError;
use crate::ui::components::{Segment, SegmentImage};
use crate::ui::core::{
    Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable,
};
use crate::ui::geometry::{Frame, SeparatorLine, snap};
use crate::ui::styling::style::clamp_non_negative;
use crate::ui::styling::{DEFAULT_SEPARATOR_COLOUR, SegmentStyle, TitleFont};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, PrimitiveStyle, Rectangle};
use log::{debug, info, warn};

/// Axis along which segments are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrganiseMode {
    /// Left to right; segments split the width
    #[default]
    Horizontal,
    /// Top to bottom; segments split the height
    Vertical,
}

impl OrganiseMode {
    /// Extent of `frame` along the primary axis
    pub fn primary_extent(&self, frame: &Frame) -> f32 {
        match self {
            OrganiseMode::Horizontal => frame.width,
            OrganiseMode::Vertical => frame.height,
        }
    }
}

/// Receives selection notifications from a [`SegmentView`]
///
/// Any `FnMut(&SegmentView, usize)` closure is a delegate.
pub trait SegmentViewDelegate {
    /// Called exactly once per selection, including re-selection of the
    /// segment that is already selected.
    fn did_select_segment(&mut self, view: &SegmentView, index: usize);
}

impl<F> SegmentViewDelegate for F
where
    F: FnMut(&SegmentView, usize),
{
    fn did_select_segment(&mut self, view: &SegmentView, index: usize) {
        self(view, index)
    }
}

/// Segmented control
///
/// # Examples
/// ```
/// use segment_view_core::{Frame, OrganiseMode, SegmentView};
///
/// let mut view = SegmentView::new(Frame::new(10.0, 10.0, 301.0, 40.0))
///     .with_organise_mode(OrganiseMode::Horizontal)
///     .with_delegate(|_view: &SegmentView, index: usize| {
///         log::info!("selected {}", index);
///     });
///
/// view.add_segment(Some("Day"), None, None);
/// view.add_segment(Some("Week"), None, None);
/// view.add_segment(Some("Month"), None, None);
/// view.select_segment_at_index(1);
///
/// assert_eq!(view.selected_index(), Some(1));
/// ```
pub struct SegmentView {
    frame: Frame,
    organise_mode: OrganiseMode,
    separator_colour: Rgb565,
    style: SegmentStyle,
    segments: Vec<Segment>,
    selected_index: Option<usize>,
    delegate: Option<Box<dyn SegmentViewDelegate>>,
    dirty: bool,
}

impl SegmentView {
    /// Create an empty view with the default style.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: sanitize_frame(frame),
            organise_mode: OrganiseMode::default(),
            separator_colour: DEFAULT_SEPARATOR_COLOUR,
            style: SegmentStyle::default(),
            segments: Vec::new(),
            selected_index: None,
            delegate: None,
            dirty: true,
        }
    }

    /// Create an empty view from explicit separator settings and a
    /// configuration bag.
    ///
    /// Missing or mistyped entries in `properties` fall back to the defaults.
    pub fn with_properties(
        frame: Frame,
        separator_colour: Rgb565,
        separator_width: f32,
        properties: &SegmentProperties,
    ) -> Self {
        let style = SegmentStyle::from_properties(properties).with_separator_width(separator_width);

        Self {
            separator_colour,
            style,
            ..Self::new(frame)
        }
    }

    pub fn with_organise_mode(mut self, mode: OrganiseMode) -> Self {
        self.set_organise_mode(mode);
        self
    }

    pub fn with_style(mut self, style: SegmentStyle) -> Self {
        self.apply_style(style);
        self
    }

    pub fn with_delegate(mut self, delegate: impl SegmentViewDelegate + 'static) -> Self {
        self.set_delegate(delegate);
        self
    }

    pub fn set_delegate(&mut self, delegate: impl SegmentViewDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn organise_mode(&self) -> OrganiseMode {
        self.organise_mode
    }

    pub fn separator_colour(&self) -> Rgb565 {
        self.separator_colour
    }

    pub fn separator_width(&self) -> f32 {
        self.style.separator_width
    }

    /// Style that the next added segment will be seeded with
    pub fn style(&self) -> &SegmentStyle {
        &self.style
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    // ------------------------------------------------------------------
    // Segments
    // ------------------------------------------------------------------

    /// Append a segment and relayout.
    ///
    /// The segment is seeded with the current style; returns its index.
    pub fn add_segment(
        &mut self,
        title: Option<&str>,
        on_selection_image: Option<SegmentImage>,
        off_selection_image: Option<SegmentImage>,
    ) -> usize {
        let index = self.segments.len();
        self.segments.push(Segment::new(
            index,
            self.style,
            title,
            on_selection_image,
            off_selection_image,
        ));
        info!("Added segment {} ({:?})", index, title);

        self.update_layout();
        index
    }

    /// Select the segment at `index` and notify the delegate.
    ///
    /// Selecting the already-selected segment deselects and reselects it and
    /// still notifies.
    ///
    /// # Panics
    ///
    /// Panics if `index >= segment_count()`. Use
    /// [`try_select_segment_at_index`](Self::try_select_segment_at_index) to
    /// get an error instead.
    pub fn select_segment_at_index(&mut self, index: usize) {
        assert!(
            index < self.segments.len(),
            "Index at {} is out of bounds",
            index
        );
        self.select_segment(index);
    }

    /// Checked form of [`select_segment_at_index`](Self::select_segment_at_index).
    ///
    /// On error nothing changes and the delegate is not called.
    pub fn try_select_segment_at_index(&mut self, index: usize) -> Result<(), SegmentError> {
        let count = self.segments.len();
        if index >= count {
            return Err(SegmentError::IndexOutOfBounds { index, count });
        }
        self.select_segment(index);
        Ok(())
    }

    /// Clear the selection. Does not notify the delegate.
    pub fn deselect_segment(&mut self) {
        if let Some(index) = self.selected_index.take() {
            self.segments[index].set_selected(false);
            debug!("Deselected segment {}", index);
        }
    }

    /// Selection request from a segment, or from the public select methods
    /// once the index is known to be valid.
    fn select_segment(&mut self, index: usize) {
        if let Some(previous) = self.selected_index {
            self.segments[previous].set_selected(false);
        }
        self.selected_index = Some(index);
        self.segments[index].set_selected(true);
        debug!("Selected segment {}", index);

        self.notify_selection(index);
    }

    fn notify_selection(&mut self, index: usize) {
        // Take the delegate out so it can borrow the view
        if let Some(mut delegate) = self.delegate.take() {
            delegate.did_select_segment(self, index);
            if self.delegate.is_none() {
                self.delegate = Some(delegate);
            }
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Resize or move the view. Always relayouts.
    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = sanitize_frame(frame);
        self.dirty = true;
        self.update_layout();
    }

    pub fn set_organise_mode(&mut self, mode: OrganiseMode) {
        self.organise_mode = mode;
        self.dirty = true;
        self.update_layout();
    }

    /// Recompute every segment frame and request a redraw.
    ///
    /// Segment frames are relative to the view's origin.
    pub fn update_layout(&mut self) {
        let count = self.segments.len();
        if count == 0 {
            return;
        }

        let width = self.frame.width;
        let height = self.frame.height;

        if count == 1 {
            self.segments[0].set_frame(Frame::from_size(width, height));
        } else {
            let separator = self.style.separator_width;
            let extent = self.organise_mode.primary_extent(&self.frame);

            let mut segment_extent = (extent - separator * (count - 1) as f32) / count as f32;
            if segment_extent < 0.0 {
                warn!(
                    "Extent {} too small for {} segments with {} separators; segments collapsed",
                    extent, count, separator
                );
                segment_extent = 0.0;
            }

            let mut origin = 0.0;
            for segment in &mut self.segments {
                let frame = match self.organise_mode {
                    OrganiseMode::Horizontal => Frame::new(origin, 0.0, segment_extent, height),
                    OrganiseMode::Vertical => Frame::new(0.0, origin, width, segment_extent),
                };
                segment.set_frame(frame);
                origin += segment_extent + separator;
            }
        }

        debug!(
            "Laid out {} segments in {}x{} ({:?})",
            count, width, height, self.organise_mode
        );
        self.dirty = true;
    }

    /// Divider lines between neighbouring segments, view-local.
    ///
    /// Derived from the current segment frames, each line sits in the middle
    /// of its gap and spans the full perpendicular extent.
    pub fn separator_lines(&self) -> Vec<SeparatorLine> {
        let count = self.segments.len();
        if count < 2 {
            return Vec::new();
        }

        let separator = self.style.separator_width;
        let mut lines = Vec::with_capacity(count - 1);

        match self.organise_mode {
            OrganiseMode::Horizontal => {
                let mut x = self.segments[0].frame().width + separator / 2.0;
                for segment in &self.segments[1..] {
                    lines.push(SeparatorLine::vertical(x, self.frame.height));
                    x += segment.frame().width + separator;
                }
            }
            OrganiseMode::Vertical => {
                let mut y = self.segments[0].frame().height + separator / 2.0;
                for segment in &self.segments[1..] {
                    lines.push(SeparatorLine::horizontal(y, self.frame.width));
                    y += segment.frame().height + separator;
                }
            }
        }

        lines
    }

    // ------------------------------------------------------------------
    // Style broadcast
    // ------------------------------------------------------------------

    fn broadcast(&mut self, mut apply: impl FnMut(&mut Segment)) {
        for segment in &mut self.segments {
            apply(segment);
        }
        self.dirty = true;
    }

    /// Replace the whole style on the view and every existing segment.
    pub fn apply_style(&mut self, style: SegmentStyle) {
        let style = style
            .with_separator_width(style.separator_width)
            .with_vertical_margin(style.vertical_margin);
        self.style = style;
        self.broadcast(|segment| segment.apply_style(style));
        self.update_layout();
    }

    pub fn set_separator_colour(&mut self, colour: Rgb565) {
        self.separator_colour = colour;
        self.dirty = true;
    }

    /// Change the separator thickness. Relayouts.
    pub fn set_separator_width(&mut self, width: f32) {
        let width = clamp_non_negative(width);
        self.style.separator_width = width;
        self.broadcast(|segment| segment.set_separator_width(width));
        self.update_layout();
    }

    pub fn set_segment_vertical_margin(&mut self, margin: f32) {
        let margin = clamp_non_negative(margin);
        self.style.vertical_margin = margin;
        self.broadcast(|segment| segment.set_vertical_margin(margin));
    }

    pub fn set_segment_on_selection_colour(&mut self, colour: Rgb565) {
        self.style.on_selection_colour = colour;
        self.broadcast(|segment| segment.set_on_selection_colour(colour));
    }

    pub fn set_segment_off_selection_colour(&mut self, colour: Rgb565) {
        self.style.off_selection_colour = colour;
        self.broadcast(|segment| segment.set_off_selection_colour(colour));
    }

    pub fn set_segment_on_selection_text_colour(&mut self, colour: Rgb565) {
        self.style.on_selection_text_colour = colour;
        self.broadcast(|segment| segment.set_on_selection_text_colour(colour));
    }

    pub fn set_segment_off_selection_text_colour(&mut self, colour: Rgb565) {
        self.style.off_selection_text_colour = colour;
        self.broadcast(|segment| segment.set_off_selection_text_colour(colour));
    }

    pub fn set_segment_title_font(&mut self, font: TitleFont) {
        self.style.title_font = font;
        self.broadcast(|segment| segment.set_title_font(font));
    }

    /// Convert a screen touch point into view-local coordinates, using the
    /// same pixel origin the view is drawn at.
    ///
    /// Only valid for points inside the view.
    fn to_local(&self, point: TouchPoint) -> TouchPoint {
        let local = point.to_point() - self.frame.origin().to_point();
        TouchPoint::new(local.x.max(0) as u16, local.y.max(0) as u16)
    }
}

/// Reject negative sizes coming from the host.
fn sanitize_frame(frame: Frame) -> Frame {
    if frame.width < 0.0 || frame.height < 0.0 {
        warn!(
            "Segment view frame {}x{} has a negative size; clamped",
            frame.width, frame.height
        );
    }
    Frame::new(frame.x, frame.y, frame.width.max(0.0), frame.height.max(0.0))
}

impl Drawable for SegmentView {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let bounds = self.bounds();
        let mut clipped = display.clipped(&bounds);
        let mut local = clipped.translated(self.frame.origin().to_point());

        for segment in &self.segments {
            segment.draw(&mut local)?;
        }

        let separator = self.style.separator_width;
        if separator > 0.0 {
            let stroke_width = snap(separator).max(1) as u32;
            let style = PrimitiveStyle::with_stroke(self.separator_colour, stroke_width);
            for line in self.separator_lines() {
                line.to_line().into_styled(style).draw(&mut local)?;
            }
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.frame.to_rectangle()
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.segments.iter().any(|s| s.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        for segment in &mut self.segments {
            segment.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            return Some(DirtyRegion::new(self.bounds()));
        }

        // Segment frames are view-local; report screen coordinates
        let origin = self.bounds().top_left;
        let mut region: Option<DirtyRegion> = None;
        for segment in self.segments.iter().filter(|s| s.is_dirty()) {
            let bounds = segment.bounds().translate(origin);
            match region {
                Some(ref mut r) => r.expand_to_include(bounds),
                None => region = Some(DirtyRegion::new(bounds)),
            }
        }

        region
    }
}

impl Touchable for SegmentView {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds().contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                let local = TouchEvent::Press(self.to_local(point));
                let activated = self.segments.iter_mut().find_map(|segment| {
                    match segment.handle_touch(local) {
                        TouchResult::Action(Action::SegmentActivated(index)) => Some(index),
                        _ => None,
                    }
                });

                match activated {
                    Some(index) => {
                        self.select_segment(index);
                        TouchResult::Action(Action::SegmentSelected(index))
                    }
                    // Press landed on a separator
                    None => TouchResult::Handled,
                }
            }
            TouchEvent::Drag(point) if self.contains_point(point) => TouchResult::Handled,
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::colors::{BLACK, DEFAULT_ON_SELECTION_COLOUR, GRAY};
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    const TOLERANCE: f32 = 1e-3;

    fn assert_close(actual: f32, expected: f32) {
        let diff = actual - expected;
        assert!(
            diff < TOLERANCE && diff > -TOLERANCE,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    fn view_with_segments(frame: Frame, count: usize) -> SegmentView {
        let mut view = SegmentView::new(frame);
        for _ in 0..count {
            view.add_segment(None, None, None);
        }
        view
    }

    /// Attach a delegate that records every notified index.
    fn record_notifications(view: &mut SegmentView) -> Rc<RefCell<Vec<usize>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        view.set_delegate(move |_: &SegmentView, index: usize| sink.borrow_mut().push(index));
        log
    }

    fn selected_count(view: &SegmentView) -> usize {
        view.segments().iter().filter(|s| s.is_selected()).count()
    }

    #[test]
    fn test_add_segment_assigns_sequential_indices() {
        let view = view_with_segments(Frame::from_size(300.0, 40.0), 4);

        assert_eq!(view.segment_count(), 4);
        for (position, segment) in view.segments().iter().enumerate() {
            assert_eq!(segment.index(), position);
        }
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn test_horizontal_layout_three_segments() {
        let view = view_with_segments(Frame::from_size(301.0, 40.0), 3);
        let width = 299.0 / 3.0;

        let origins = [0.0, width + 1.0, 2.0 * (width + 1.0)];
        for (segment, origin) in view.segments().iter().zip(origins) {
            let frame = segment.frame();
            assert_close(frame.x, origin);
            assert_close(frame.y, 0.0);
            assert_close(frame.width, width);
            assert_close(frame.height, 40.0);
        }
        assert_close(view.segments()[1].frame().x, 100.666);
        assert_close(view.segments()[2].frame().x, 201.333);
    }

    #[test]
    fn test_vertical_layout_splits_height() {
        let view = view_with_segments(Frame::from_size(80.0, 122.0), 4)
            .with_organise_mode(OrganiseMode::Vertical);

        // (122 - 3) / 4
        let height = 29.75;
        for (position, segment) in view.segments().iter().enumerate() {
            let frame = segment.frame();
            assert_close(frame.x, 0.0);
            assert_close(frame.y, position as f32 * (height + 1.0));
            assert_close(frame.width, 80.0);
            assert_close(frame.height, height);
        }
    }

    #[test]
    fn test_single_segment_fills_view() {
        let mut view = view_with_segments(Frame::new(5.0, 5.0, 120.0, 30.0), 1);
        view.set_separator_width(12.0);

        assert_eq!(view.segments()[0].frame(), Frame::from_size(120.0, 30.0));
        assert!(view.separator_lines().is_empty());
    }

    #[test]
    fn test_layout_is_noop_without_segments() {
        let mut view = SegmentView::new(Frame::from_size(100.0, 20.0));
        view.mark_clean();
        view.update_layout();

        assert!(!view.is_dirty());
        assert!(view.separator_lines().is_empty());
    }

    #[test]
    fn test_set_frame_relayouts() {
        let mut view = view_with_segments(Frame::from_size(101.0, 20.0), 2);
        view.set_frame(Frame::new(0.0, 0.0, 201.0, 30.0));

        assert_close(view.segments()[1].frame().x, 101.0);
        assert_close(view.segments()[1].frame().width, 100.0);
        assert_close(view.segments()[1].frame().height, 30.0);
    }

    #[test]
    fn test_separator_width_change_relayouts() {
        let mut view = view_with_segments(Frame::from_size(100.0, 20.0), 2);
        view.set_separator_width(10.0);

        assert_close(view.segments()[0].frame().width, 45.0);
        assert_close(view.segments()[1].frame().x, 55.0);
        assert!(view.segments().iter().all(|s| s.style().separator_width == 10.0));
    }

    #[test]
    fn test_degenerate_extent_collapses_segments() {
        let mut view = view_with_segments(Frame::from_size(3.0, 20.0), 3);
        view.set_separator_width(4.0);

        for segment in view.segments() {
            assert_eq!(segment.frame().width, 0.0);
        }
    }

    #[test]
    fn test_negative_separator_width_is_clamped() {
        let mut view = view_with_segments(Frame::from_size(100.0, 20.0), 2);
        view.set_separator_width(-5.0);

        assert_eq!(view.separator_width(), 0.0);
        assert_close(view.segments()[0].frame().width, 50.0);
    }

    #[test]
    fn test_separator_lines_are_centred_horizontal() {
        let mut view = view_with_segments(Frame::from_size(302.0, 40.0), 3);
        view.set_separator_width(4.0);

        // (302 - 8) / 3 = 98
        let lines = view.separator_lines();
        assert_eq!(lines.len(), 2);
        assert_close(lines[0].start.x, 100.0);
        assert_close(lines[1].start.x, 202.0);
        for line in &lines {
            assert_close(line.start.x, line.end.x);
            assert_close(line.start.y, 0.0);
            assert_close(line.end.y, 40.0);
        }
    }

    #[test]
    fn test_separator_lines_are_centred_vertical() {
        let view = view_with_segments(Frame::from_size(60.0, 203.0), 4)
            .with_organise_mode(OrganiseMode::Vertical);

        // (203 - 3) / 4 = 50
        let lines = view.separator_lines();
        assert_eq!(lines.len(), 3);
        for (n, line) in lines.iter().enumerate() {
            let y = 50.5 + n as f32 * 51.0;
            assert_close(line.start.y, y);
            assert_close(line.end.y, y);
            assert_close(line.start.x, 0.0);
            assert_close(line.end.x, 60.0);
        }
    }

    #[test]
    fn test_select_notifies_once_with_index() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 3);
        let log = record_notifications(&mut view);

        view.select_segment_at_index(2);

        assert_eq!(*log.borrow(), vec![2]);
        assert_eq!(view.selected_index(), Some(2));
        assert!(view.segments()[2].is_selected());
    }

    #[test]
    fn test_reselecting_same_index_notifies_again() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 3);
        let log = record_notifications(&mut view);

        view.select_segment_at_index(1);
        view.select_segment_at_index(1);

        assert_eq!(*log.borrow(), vec![1, 1]);
        assert_eq!(selected_count(&view), 1);
    }

    #[test]
    fn test_selection_stays_exclusive() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 4);

        for index in [0, 3, 1, 1, 2, 0] {
            view.select_segment_at_index(index);
            assert_eq!(selected_count(&view), 1);
            assert_eq!(view.selected_index(), Some(index));
            assert!(view.segments()[index].is_selected());
        }
    }

    #[test]
    fn test_deselect_without_selection_is_noop() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 2);
        let log = record_notifications(&mut view);
        view.mark_clean();

        view.deselect_segment();

        assert!(log.borrow().is_empty());
        assert_eq!(view.selected_index(), None);
        assert!(!view.is_dirty());
    }

    #[test]
    fn test_deselect_clears_selection_silently() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 2);
        let log = record_notifications(&mut view);

        view.select_segment_at_index(0);
        view.deselect_segment();

        assert_eq!(*log.borrow(), vec![0]);
        assert_eq!(view.selected_index(), None);
        assert_eq!(selected_count(&view), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_select_out_of_bounds_panics() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 3);
        view.select_segment_at_index(3);
    }

    #[test]
    fn test_try_select_out_of_bounds_changes_nothing() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 3);
        let log = record_notifications(&mut view);
        view.select_segment_at_index(1);

        let result = view.try_select_segment_at_index(3);

        assert!(matches!(
            result,
            Err(SegmentError::IndexOutOfBounds { index: 3, count: 3 })
        ));
        assert_eq!(view.selected_index(), Some(1));
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_style_broadcast_and_snapshot_at_add_time() {
        let mut view = view_with_segments(Frame::from_size(400.0, 40.0), 3);

        view.set_segment_on_selection_colour(BLACK);
        assert!(view.segments().iter().all(|s| s.style().on_selection_colour == BLACK));

        view.add_segment(Some("Late"), None, None);
        assert_eq!(view.segments()[3].style().on_selection_colour, BLACK);
    }

    #[test]
    fn test_segments_added_earlier_keep_their_seed() {
        let mut view = SegmentView::new(Frame::from_size(200.0, 40.0));
        view.add_segment(None, None, None);
        assert_eq!(
            view.segments()[0].style().on_selection_colour,
            DEFAULT_ON_SELECTION_COLOUR
        );

        view.set_segment_off_selection_text_colour(GRAY);
        view.add_segment(None, None, None);

        for segment in view.segments() {
            assert_eq!(segment.style().off_selection_text_colour, GRAY);
        }
    }

    #[test]
    fn test_apply_style_reaches_every_segment() {
        let mut view = view_with_segments(Frame::from_size(200.0, 40.0), 2);
        let style = SegmentStyle::new()
            .with_title_font(TitleFont::Small)
            .with_separator_width(0.0);

        view.apply_style(style);

        assert!(view.segments().iter().all(|s| *s.style() == style));
        assert_close(view.segments()[0].frame().width, 100.0);
    }

    #[test]
    fn test_press_selects_segment_under_touch() {
        let mut view = view_with_segments(Frame::new(10.0, 20.0, 301.0, 40.0), 3);
        let log = record_notifications(&mut view);

        let result = view.handle_touch(TouchEvent::Press(TouchPoint::new(160, 30)));

        assert_eq!(result, TouchResult::Action(Action::SegmentSelected(1)));
        assert_eq!(view.selected_index(), Some(1));
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_press_outside_view_is_ignored() {
        let mut view = view_with_segments(Frame::new(10.0, 20.0, 301.0, 40.0), 3);

        let result = view.handle_touch(TouchEvent::Press(TouchPoint::new(5, 30)));

        assert_eq!(result, TouchResult::NotHandled);
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn test_press_on_separator_selects_nothing() {
        // Segment 0 is drawn on columns 0..=99, segment 1 from 101
        let mut view = view_with_segments(Frame::from_size(301.0, 40.0), 3);

        let result = view.handle_touch(TouchEvent::Press(TouchPoint::new(100, 10)));

        assert_eq!(result, TouchResult::Handled);
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn test_dirty_region_tracks_changed_segment() {
        let mut view = view_with_segments(Frame::new(10.0, 0.0, 200.0, 40.0), 2);
        view.mark_clean();
        assert!(view.dirty_region().is_none());

        view.select_segment_at_index(1);

        let region = view.dirty_region().unwrap();
        // Segment 1 spans local x 100.5..200 -> screen 111..210
        assert_eq!(region.bounds.top_left, Point::new(111, 0));
        assert_eq!(region.bounds.size, Size::new(99, 40));
    }

    #[test]
    fn test_delegate_may_inspect_view() {
        let mut view = view_with_segments(Frame::from_size(300.0, 40.0), 3);
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        view.set_delegate(move |view: &SegmentView, index: usize| {
            *sink.borrow_mut() = Some((view.selected_index(), index, view.segment_count()));
        });

        view.select_segment_at_index(0);

        assert_eq!(*seen.borrow(), Some((Some(0), 0, 3)));
    }
}
