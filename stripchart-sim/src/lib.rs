//! Host-side simulated surface for the stripchart engines
//!
//! `SimSurface` keeps a pixel framebuffer and a journal of text draws so
//! tests can assert on exactly what a frame contains, and the demo
//! binaries can print frames as ASCII art. No hardware anywhere.

pub mod surface;

pub use surface::{SimSurface, TextOp};
