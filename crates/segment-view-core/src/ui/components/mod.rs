// src/ui/components/mod.rs
//! UI components library

pub mod segment;

pub use segment::{MAX_TITLE_LEN, Segment, SegmentContent, SegmentImage};
