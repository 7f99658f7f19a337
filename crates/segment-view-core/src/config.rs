//! Segment configuration bag
//!
//! A [`SegmentProperties`] maps well-known string keys to typed values and is
//! read once when a [`SegmentView`](crate::ui::SegmentView) is constructed.
//! Lookups are forgiving: a missing key or a value of the wrong type yields
//! `None` and the caller substitutes its default, and keys nobody reads are
//! carried along untouched.
//!
//! The bag is serde-serializable and can be stored with postcard, e.g. to ship
//! a theme alongside firmware.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SegmentError;
use crate::ui::styling::TitleFont;

// ============================================================================
// Keys
// ============================================================================

/// Top/bottom margin of the segment content (`Float`)
pub const KEY_CONTENT_VERTICAL_MARGIN: &str = "VerticalMargin";

/// Background of the selected segment (`Colour`)
pub const KEY_SEGMENT_ON_SELECTION_COLOUR: &str = "OnSelectionBackgroundColour";

/// Background of unselected segments (`Colour`)
pub const KEY_SEGMENT_OFF_SELECTION_COLOUR: &str = "OffSelectionBackgroundColour";

/// Title colour of the selected segment (`Colour`)
pub const KEY_SEGMENT_ON_SELECTION_TEXT_COLOUR: &str = "OnSelectionTextColour";

/// Title colour of unselected segments (`Colour`)
pub const KEY_SEGMENT_OFF_SELECTION_TEXT_COLOUR: &str = "OffSelectionTextColour";

/// Title font (`Font`)
pub const KEY_SEGMENT_TITLE_FONT: &str = "TitleFont";

// ============================================================================
// Values
// ============================================================================

/// A typed configuration value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Colour(#[serde(with = "raw_colour")] Rgb565),
    Font(TitleFont),
}

/// Serialize colours as their raw RGB565 storage value.
mod raw_colour {
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(colour: &Rgb565, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(RawU16::from(*colour).into_inner())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb565, D::Error> {
        u16::deserialize(deserializer).map(|raw| Rgb565::from(RawU16::new(raw)))
    }
}

// ============================================================================
// Property Bag
// ============================================================================

/// Configuration bag for segment styling
///
/// # Examples
///
/// ```
/// use segment_view_core::config::{KEY_CONTENT_VERTICAL_MARGIN, PropertyValue, SegmentProperties};
///
/// let properties = SegmentProperties::new()
///     .with(KEY_CONTENT_VERTICAL_MARGIN, PropertyValue::Float(8.0));
/// assert_eq!(properties.float(KEY_CONTENT_VERTICAL_MARGIN), Some(8.0));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SegmentProperties {
    entries: BTreeMap<String, PropertyValue>,
}

impl SegmentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: &str, value: PropertyValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Store `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: &str, value: PropertyValue) -> Option<PropertyValue> {
        self.entries.insert(key.to_string(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Float stored under `key`; `None` if missing or not a float.
    pub fn float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            PropertyValue::Float(value) => Some(*value),
            other => mismatch(key, other),
        }
    }

    /// Colour stored under `key`; `None` if missing or not a colour.
    pub fn colour(&self, key: &str) -> Option<Rgb565> {
        match self.get(key)? {
            PropertyValue::Colour(colour) => Some(*colour),
            other => mismatch(key, other),
        }
    }

    /// Font stored under `key`; `None` if missing or not a font.
    pub fn font(&self, key: &str) -> Option<TitleFont> {
        match self.get(key)? {
            PropertyValue::Font(font) => Some(*font),
            other => mismatch(key, other),
        }
    }

    /// Encode the bag with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SegmentError> {
        postcard::to_allocvec(self).map_err(SegmentError::Encode)
    }

    /// Decode a bag previously produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SegmentError> {
        postcard::from_bytes(bytes).map_err(SegmentError::Decode)
    }
}

fn mismatch<T>(key: &str, value: &PropertyValue) -> Option<T> {
    debug!("Ignoring segment property {}: unexpected value {:?}", key, value);
    None
}
