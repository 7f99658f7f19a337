// src/ui/mod.rs
//! Segmented control UI system
//!
//! This module provides:
//! - Core traits for drawable and touchable elements
//! - Float geometry used by the layout engine, snapped to pixels for drawing
//! - The [`Segment`] component and the [`SegmentView`] container
//! - Segment styling (colours, fonts, margins)

pub mod components;
pub mod core;
pub mod geometry;
pub mod layouts;
pub mod styling;

// Re-export commonly used items
pub use components::{MAX_TITLE_LEN, Segment, SegmentContent, SegmentImage};
pub use core::{Action, DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
pub use geometry::{Frame, Position, SeparatorLine};
pub use layouts::{OrganiseMode, SegmentView, SegmentViewDelegate};
pub use styling::{SegmentStyle, TitleFont};
