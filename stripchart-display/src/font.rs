//! Font cell metrics
//!
//! The engines only need the fixed cell size of the surface's current
//! font; glyph data stays inside the surface implementation.

/// Pixel dimensions of a fixed-width font cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Cell width in pixels
    pub width: u16,
    /// Cell height in pixels
    pub height: u16,
}

impl FontMetrics {
    /// 6x8 cell, the usual small OLED text font
    pub const FONT_6X8: FontMetrics = FontMetrics::new(6, 8);
    /// 8x8 cell
    pub const FONT_8X8: FontMetrics = FontMetrics::new(8, 8);
    /// 8x12 cell
    pub const FONT_8X12: FontMetrics = FontMetrics::new(8, 12);
    /// 12x16 cell, for titles
    pub const FONT_12X16: FontMetrics = FontMetrics::new(12, 16);

    /// Create font metrics from a cell size
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::FONT_6X8
    }
}
