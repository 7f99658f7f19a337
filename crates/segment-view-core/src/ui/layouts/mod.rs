// src/ui/layouts/mod.rs
//! Layout components for arranging UI elements

pub mod segment_view;

pub use segment_view::{OrganiseMode, SegmentView, SegmentViewDelegate};
