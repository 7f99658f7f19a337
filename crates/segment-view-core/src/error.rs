//! Error types for segment-view

use thiserror_no_std::Error;

/// Recoverable errors raised by the segment view and its configuration.
///
/// Out-of-bounds selection through
/// [`SegmentView::select_segment_at_index`](crate::ui::SegmentView::select_segment_at_index)
/// is a programmer error and panics instead; the checked
/// [`try_select_segment_at_index`](crate::ui::SegmentView::try_select_segment_at_index)
/// reports it as [`SegmentError::IndexOutOfBounds`].
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Index at {index} is out of bounds (segment count {count})")]
    IndexOutOfBounds { index: usize, count: usize },
    #[error("Failed to encode segment properties: {0}")]
    Encode(postcard::Error),
    #[error("Failed to decode segment properties: {0}")]
    Decode(postcard::Error),
}
