//! Scrolling log demo on the simulated surface
//!
//! Writes a stream of status lines, some long enough to hard-wrap, and
//! prints the final frame as ASCII art.

use rand::Rng;
use stripchart_core::ScrollingText;
use stripchart_display::{Color, FontMetrics, Surface, SurfaceError};
use stripchart_sim::SimSurface;

const WIDTH: u16 = 96;
const HEIGHT: u16 = 40;

fn main() -> Result<(), SurfaceError> {
    let mut surface = SimSurface::new(WIDTH, HEIGHT);
    surface.set_font(FontMetrics::FONT_6X8);

    let mut log: ScrollingText<_> = ScrollingText::new(surface, WIDTH, HEIGHT);
    log.write_line("boot ok")?;

    let mut rng = rand::thread_rng();
    for reading in 0..8 {
        let value: i32 = rng.gen_range(-40..=85);
        log.write_line(&format!("sensor {}: {} C", reading, value))?;
    }
    log.write_line("a much longer status line that has to hard-wrap")?;
    log.set_color(Color::GREEN)?;

    println!("{}", log.surface());
    Ok(())
}
