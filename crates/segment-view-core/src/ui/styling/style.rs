//! Segment style configuration
//!
//! [`SegmentStyle`] is the set of properties a [`SegmentView`](crate::ui::SegmentView)
//! mirrors onto every segment it owns. A new segment receives a copy of the
//! view's style at the moment it is added; later changes reach it only through
//! the view's setters, which broadcast to every existing segment.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_8X13, FONT_9X18, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::PrimitiveStyle;
use serde::{Deserialize, Serialize};

use super::colors::{
    DEFAULT_OFF_SELECTION_COLOUR, DEFAULT_OFF_SELECTION_TEXT_COLOUR, DEFAULT_ON_SELECTION_COLOUR,
    DEFAULT_ON_SELECTION_TEXT_COLOUR,
};
use crate::config::{
    KEY_CONTENT_VERTICAL_MARGIN, KEY_SEGMENT_OFF_SELECTION_COLOUR,
    KEY_SEGMENT_OFF_SELECTION_TEXT_COLOUR, KEY_SEGMENT_ON_SELECTION_COLOUR,
    KEY_SEGMENT_ON_SELECTION_TEXT_COLOUR, KEY_SEGMENT_TITLE_FONT, SegmentProperties,
};

/// Default separator thickness, in pixels
pub const DEFAULT_SEPARATOR_WIDTH: f32 = 1.0;

/// Default top/bottom margin around segment content, in pixels
pub const DEFAULT_VERTICAL_MARGIN: f32 = 5.0;

// ============================================================================
// Title Font
// ============================================================================

/// Font used for segment titles
///
/// Maps onto the embedded-graphics ASCII mono fonts:
/// - `Small`: 6x10
/// - `Medium`: 8x13
/// - `Large`: 9x18 (default)
/// - `ExtraLarge`: 10x20
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TitleFont {
    Small,
    Medium,
    #[default]
    Large,
    ExtraLarge,
}

impl TitleFont {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TitleFont::Small => &FONT_6X10,
            TitleFont::Medium => &FONT_8X13,
            TitleFont::Large => &FONT_9X18,
            TitleFont::ExtraLarge => &FONT_10X20,
        }
    }

    /// Width in pixels of `text` rendered in this font.
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return 0;
        }
        chars * font.character_size.width + (chars - 1) * font.character_spacing
    }

    /// Line height in pixels.
    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }
}

// ============================================================================
// Segment Style
// ============================================================================

/// Style snapshot shared by a segment view and its segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    /// Separator thickness between segments (pixels, never negative)
    pub separator_width: f32,

    /// Top/bottom margin around the segment image (pixels, never negative)
    pub vertical_margin: f32,

    /// Background when selected
    pub on_selection_colour: Rgb565,

    /// Background when not selected
    pub off_selection_colour: Rgb565,

    /// Title colour when selected
    pub on_selection_text_colour: Rgb565,

    /// Title colour when not selected
    pub off_selection_text_colour: Rgb565,

    /// Title font
    pub title_font: TitleFont,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self {
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            vertical_margin: DEFAULT_VERTICAL_MARGIN,
            on_selection_colour: DEFAULT_ON_SELECTION_COLOUR,
            off_selection_colour: DEFAULT_OFF_SELECTION_COLOUR,
            on_selection_text_colour: DEFAULT_ON_SELECTION_TEXT_COLOUR,
            off_selection_text_colour: DEFAULT_OFF_SELECTION_TEXT_COLOUR,
            title_font: TitleFont::default(),
        }
    }
}

impl SegmentStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a style from a configuration bag.
    ///
    /// Missing keys and entries of the wrong type fall back to the defaults;
    /// unknown keys are ignored. The separator width is not part of the bag
    /// and keeps its default.
    pub fn from_properties(properties: &SegmentProperties) -> Self {
        let defaults = Self::default();

        Self {
            separator_width: defaults.separator_width,
            vertical_margin: properties
                .float(KEY_CONTENT_VERTICAL_MARGIN)
                .map(clamp_non_negative)
                .unwrap_or(defaults.vertical_margin),
            on_selection_colour: properties
                .colour(KEY_SEGMENT_ON_SELECTION_COLOUR)
                .unwrap_or(defaults.on_selection_colour),
            off_selection_colour: properties
                .colour(KEY_SEGMENT_OFF_SELECTION_COLOUR)
                .unwrap_or(defaults.off_selection_colour),
            on_selection_text_colour: properties
                .colour(KEY_SEGMENT_ON_SELECTION_TEXT_COLOUR)
                .unwrap_or(defaults.on_selection_text_colour),
            off_selection_text_colour: properties
                .colour(KEY_SEGMENT_OFF_SELECTION_TEXT_COLOUR)
                .unwrap_or(defaults.off_selection_text_colour),
            title_font: properties
                .font(KEY_SEGMENT_TITLE_FONT)
                .unwrap_or(defaults.title_font),
        }
    }

    pub fn with_separator_width(mut self, width: f32) -> Self {
        self.separator_width = clamp_non_negative(width);
        self
    }

    pub fn with_vertical_margin(mut self, margin: f32) -> Self {
        self.vertical_margin = clamp_non_negative(margin);
        self
    }

    pub fn with_on_selection_colour(mut self, colour: Rgb565) -> Self {
        self.on_selection_colour = colour;
        self
    }

    pub fn with_off_selection_colour(mut self, colour: Rgb565) -> Self {
        self.off_selection_colour = colour;
        self
    }

    pub fn with_on_selection_text_colour(mut self, colour: Rgb565) -> Self {
        self.on_selection_text_colour = colour;
        self
    }

    pub fn with_off_selection_text_colour(mut self, colour: Rgb565) -> Self {
        self.off_selection_text_colour = colour;
        self
    }

    pub fn with_title_font(mut self, font: TitleFont) -> Self {
        self.title_font = font;
        self
    }

    /// Background colour for the given selection state
    pub fn background_colour(&self, selected: bool) -> Rgb565 {
        if selected {
            self.on_selection_colour
        } else {
            self.off_selection_colour
        }
    }

    /// Title colour for the given selection state
    pub fn text_colour(&self, selected: bool) -> Rgb565 {
        if selected {
            self.on_selection_text_colour
        } else {
            self.off_selection_text_colour
        }
    }

    /// Fill style for a segment background in the given selection state
    pub fn to_primitive_style(&self, selected: bool) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyle::with_fill(self.background_colour(selected))
    }
}

/// Clamp negative widths and margins to zero, logging the misconfiguration.
pub(crate) fn clamp_non_negative(value: f32) -> f32 {
    if value < 0.0 {
        log::warn!("Negative segment dimension {} clamped to 0", value);
        0.0
    } else {
        value
    }
}
