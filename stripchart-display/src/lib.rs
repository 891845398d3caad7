//! Rendering surface abstraction for the stripchart engines
//!
//! This crate provides:
//! - `Surface` trait for the off-screen drawing capability the engines
//!   consume (clear, line, text, flush, font and rotation state)
//! - `Color`, `FontMetrics` and `Rotation` value types
//! - Scoped `with_font` / `with_rotation` helpers that restore surface
//!   state on every exit path
//!
//! # Architecture
//!
//! The engines never talk to hardware. A display module implements
//! `Surface` with its hardware-specific code (SPI TFT, I2C OLED, a host
//! framebuffer) and hands the handle to an engine, which drives a full
//! frame per `draw` call and ends it with `show`.

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod font;
pub mod rotation;
pub mod surface;

// Re-export key types
pub use color::Color;
pub use font::FontMetrics;
pub use rotation::Rotation;
pub use surface::{with_font, with_rotation, Surface, SurfaceError};
