//! Surface trait
//!
//! Defines the off-screen drawing capability the engines consume.

use crate::color::Color;
use crate::font::FontMetrics;
use crate::rotation::Rotation;

/// Surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Surface not initialized
    NotInitialized,
}

/// Off-screen rendering surface
///
/// Provides a hardware-agnostic interface for building a frame and
/// flushing it to a panel. Implementations handle the specifics of TFT,
/// OLED or simulated displays. Draw calls take absolute pixel
/// coordinates in the surface's current rotation frame; out-of-bounds
/// pixels may be clipped or rejected, at the implementation's choice.
pub trait Surface {
    /// Native pixel width
    fn width(&self) -> u16;

    /// Native pixel height
    fn height(&self) -> u16;

    /// Wipe the off-screen buffer
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Draw one straight segment in absolute pixel coordinates
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color)
        -> Result<(), SurfaceError>;

    /// Draw left-origin text at `(x, y)` using the current font
    ///
    /// `color` of `None` uses the surface's default text color.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Option<Color>)
        -> Result<(), SurfaceError>;

    /// Flush the off-screen buffer to the physical display
    fn show(&mut self) -> Result<(), SurfaceError>;

    /// Current font cell metrics
    fn font(&self) -> FontMetrics;

    /// Swap the current font; affects subsequent `draw_text` calls
    fn set_font(&mut self, font: FontMetrics);

    /// Current orientation of the coordinate frame
    fn rotation(&self) -> Rotation;

    /// Rotate the coordinate frame for subsequent draws
    fn set_rotation(&mut self, rotation: Rotation);
}

/// Run `f` with `font` swapped in, restoring the previous font afterwards.
///
/// Restoration happens on every exit path, including an `Err` from `f`.
/// A `font` of `None` leaves the surface untouched.
pub fn with_font<S, T>(
    surface: &mut S,
    font: Option<FontMetrics>,
    f: impl FnOnce(&mut S) -> Result<T, SurfaceError>,
) -> Result<T, SurfaceError>
where
    S: Surface + ?Sized,
{
    match font {
        Some(font) => {
            let saved = surface.font();
            surface.set_font(font);
            let result = f(surface);
            surface.set_font(saved);
            result
        }
        None => f(surface),
    }
}

/// Run `f` with the frame rotated to `rotation`, restoring afterwards.
///
/// Restoration happens on every exit path, including an `Err` from `f`.
pub fn with_rotation<S, T>(
    surface: &mut S,
    rotation: Rotation,
    f: impl FnOnce(&mut S) -> Result<T, SurfaceError>,
) -> Result<T, SurfaceError>
where
    S: Surface + ?Sized,
{
    let saved = surface.rotation();
    surface.set_rotation(rotation);
    let result = f(surface);
    surface.set_rotation(saved);
    result
}
