//! Graph labels
//!
//! A label carries its own text, alignment and optional font/color; the
//! graph engine resolves where it lands during layout. A label whose text
//! is blank is skipped entirely.

use heapless::String;
use stripchart_display::{Color, FontMetrics};

/// Maximum label text length in bytes
pub const MAX_LABEL_LEN: usize = 32;

/// Horizontal alignment of label text within its available width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A text label for the graph title or an axis
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    text: String<MAX_LABEL_LEN>,
    font: Option<FontMetrics>,
    color: Option<Color>,
    align: Align,
}

impl Label {
    /// Create a left-aligned label; text beyond `MAX_LABEL_LEN` bytes is
    /// truncated on a character boundary
    pub fn new(text: &str) -> Self {
        let mut truncated = String::new();
        for ch in text.chars() {
            if truncated.push(ch).is_err() {
                break;
            }
        }
        Self {
            text: truncated,
            font: None,
            color: None,
            align: Align::Left,
        }
    }

    /// Use a specific font instead of the surface's current one
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = Some(font);
        self
    }

    /// Use a specific color instead of the surface's default
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the horizontal alignment
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> Option<FontMetrics> {
        self.font
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Whether the label has no visible text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The font cell used for this label, falling back to the surface's
    /// current font
    pub(crate) fn font_or(&self, fallback: FontMetrics) -> FontMetrics {
        self.font.unwrap_or(fallback)
    }

    /// Start X of the label text within `available` pixels.
    ///
    /// Text at least as wide as the available space starts at 0 and
    /// overruns; alignment only applies when there is room to spare.
    pub fn start_x(&self, available: u16, fallback: FontMetrics) -> u16 {
        let font = self.font_or(fallback);
        let text_len = self.text.chars().count() as u32 * font.width as u32;
        let available = available as u32;

        if text_len >= available {
            return 0;
        }
        let right = available - text_len;
        let start = match self.align {
            Align::Left => 0,
            Align::Right => right,
            Align::Center => right / 2,
        };
        start as u16
    }
}
