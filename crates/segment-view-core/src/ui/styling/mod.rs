//! Styling for segments
//!
//! - [`colors`] - RGB565 colour constants and the segment-view defaults
//! - [`style`] - [`SegmentStyle`], the style snapshot shared by the view and
//!   every segment, and [`TitleFont`]

pub mod colors;
pub mod style;

pub use colors::{
    BLACK, DARK_GRAY, DEFAULT_OFF_SELECTION_COLOUR, DEFAULT_OFF_SELECTION_TEXT_COLOUR,
    DEFAULT_ON_SELECTION_COLOUR, DEFAULT_ON_SELECTION_TEXT_COLOUR, DEFAULT_SEPARATOR_COLOUR,
    GRAY, LIGHT_GRAY, WHITE,
};
pub use style::{
    DEFAULT_SEPARATOR_WIDTH, DEFAULT_VERTICAL_MARGIN, SegmentStyle, TitleFont,
};
