//! Hardware-independent core library for segment-view
//!
//! This crate contains the layout and selection engine of a segmented
//! control: an ordered strip of mutually-exclusive segments laid out
//! horizontally or vertically, separated by divider lines, and styled with
//! shared selected/unselected colours.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests). Any
//! `embedded_graphics` [`DrawTarget`](embedded_graphics::draw_target::DrawTarget)
//! with an `Rgb565` colour can serve as the drawing surface.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod framebuffer;
pub mod ui;

pub use config::{PropertyValue, SegmentProperties};
pub use error::SegmentError;
pub use framebuffer::FrameBuffer;
pub use ui::{
    Action, Drawable, Frame, OrganiseMode, Segment, SegmentImage, SegmentStyle, SegmentView,
    SegmentViewDelegate, SeparatorLine, TitleFont, TouchEvent, TouchPoint, TouchResult,
    Touchable,
};
