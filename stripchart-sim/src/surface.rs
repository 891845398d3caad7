//! Simulated rendering surface
//!
//! A `Surface` backed by an in-memory pixel buffer. Lines are rasterized
//! with Bresenham's algorithm; text draws are journaled with the font and
//! rotation state they were issued under instead of being rasterized.
//! Out-of-bounds pixels are clipped silently, matching what the small
//! panel drivers do.

use std::fmt;

use stripchart_display::{Color, FontMetrics, Rotation, Surface, SurfaceError};

/// One journaled text draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOp {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Option<Color>,
    /// Font that was current when the draw was issued
    pub font: FontMetrics,
    /// Rotation frame the draw was issued in
    pub rotation: Rotation,
}

/// In-memory rendering surface
pub struct SimSurface {
    width: u16,
    height: u16,
    font: FontMetrics,
    rotation: Rotation,
    pixels: Vec<Option<Color>>,
    text_ops: Vec<TextOp>,
    shows: u32,
}

impl SimSurface {
    /// Create a blank surface of the given pixel extents
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            font: FontMetrics::FONT_6X8,
            rotation: Rotation::Deg0,
            pixels: vec![None; width as usize * height as usize],
            text_ops: Vec::new(),
            shows: 0,
        }
    }

    /// Color of the pixel at `(x, y)`, if any draw touched it since the
    /// last clear
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Text draws since the last clear, in issue order
    pub fn text_ops(&self) -> &[TextOp] {
        &self.text_ops
    }

    /// Number of `show` calls over the surface's lifetime
    pub fn show_count(&self) -> u32 {
        self.shows
    }

    /// Count of lit pixels
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = Some(color);
    }
}

impl Surface for SimSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.pixels.fill(None);
        self.text_ops.clear();
        Ok(())
    }

    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        // Bresenham, both octant groups
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x1;
        let mut y = y1;
        loop {
            self.put_pixel(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Option<Color>,
    ) -> Result<(), SurfaceError> {
        self.text_ops.push(TextOp {
            x,
            y,
            text: text.to_string(),
            color,
            font: self.font,
            rotation: self.rotation,
        });
        Ok(())
    }

    fn show(&mut self) -> Result<(), SurfaceError> {
        self.shows += 1;
        log::trace!(
            "show #{}: {} lit pixels, {} text draws",
            self.shows,
            self.lit_pixels(),
            self.text_ops.len()
        );
        Ok(())
    }

    fn font(&self) -> FontMetrics {
        self.font
    }

    fn set_font(&mut self, font: FontMetrics) {
        self.font = font;
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }
}

/// ASCII rendering of the frame: `#` for lit pixels, `.` for dark ones,
/// with journaled text stamped in at its origin (native rotation only).
impl fmt::Display for SimSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid: Vec<Vec<char>> = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.pixel(x, y).is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect();

        for op in &self.text_ops {
            if op.rotation != Rotation::Deg0 || op.y < 0 || op.y >= self.height as i32 {
                continue;
            }
            let row = &mut grid[op.y as usize];
            for (i, ch) in op.text.chars().enumerate() {
                let col = op.x + i as i32;
                if (0..self.width as i32).contains(&col) {
                    row[col as usize] = ch;
                }
            }
        }

        for row in grid {
            for ch in row {
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
