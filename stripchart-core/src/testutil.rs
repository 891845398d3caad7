//! Test support: a surface that journals every call
//!
//! Text is not rasterized; draws are recorded together with the font and
//! rotation state they were issued under, so tests can assert on layout
//! and scoped-restore behavior.

use std::string::{String, ToString};
use std::vec::Vec;

use stripchart_display::{Color, FontMetrics, Rotation, Surface, SurfaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOp {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOp {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Option<Color>,
    pub font: FontMetrics,
    pub rotation: Rotation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clear,
    Line(LineOp),
    Text(TextOp),
    Show,
}

pub struct RecordingSurface {
    width: u16,
    height: u16,
    font: FontMetrics,
    rotation: Rotation,
    ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            font: FontMetrics::FONT_6X8,
            rotation: Rotation::Deg0,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn line_ops(&self) -> Vec<LineOp> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Line(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn text_ops(&self) -> Vec<TextOp> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn show_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Show)).count()
    }

    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Clear)).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(Op::Clear);
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
        self.ops.push(Op::Line(LineOp { x1, y1, x2, y2, color }));
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Option<Color>,
    ) -> Result<(), SurfaceError> {
        self.ops.push(Op::Text(TextOp {
            x,
            y,
            text: text.to_string(),
            color,
            font: self.font,
            rotation: self.rotation,
        }));
        Ok(())
    }

    fn show(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(Op::Show);
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
