//! Colour definitions
//!
//! All colours are RGB565, the native format of the displays this crate
//! targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

// ============================================================================
// Base Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Black
pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

/// Light gray (~170/255)
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray (~128/255)
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray (~85/255)
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 20, 10);

// ============================================================================
// Segment View Defaults
// ============================================================================

/// Divider lines between segments
pub const DEFAULT_SEPARATOR_COLOUR: Rgb565 = LIGHT_GRAY;

/// Background of the selected segment
pub const DEFAULT_ON_SELECTION_COLOUR: Rgb565 = DARK_GRAY;

/// Background of unselected segments
pub const DEFAULT_OFF_SELECTION_COLOUR: Rgb565 = WHITE;

/// Title colour of the selected segment
pub const DEFAULT_ON_SELECTION_TEXT_COLOUR: Rgb565 = WHITE;

/// Title colour of unselected segments
pub const DEFAULT_OFF_SELECTION_TEXT_COLOUR: Rgb565 = DARK_GRAY;
