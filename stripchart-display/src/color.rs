//! RGB color type
//!
//! Surfaces are free to quantize (RGB565 panels, 1bpp OLEDs); the engines
//! only pass colors through.

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
    pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);

    /// Create a color from its RGB components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
