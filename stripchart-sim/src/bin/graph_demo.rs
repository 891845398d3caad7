//! Random-walk graph demo on the simulated surface
//!
//! Mirrors the original hardware sample: seed the graph with a flat run
//! of zeros, then feed a bounded random walk and redraw every sample.
//! A few frames are printed as ASCII art along the way.

use rand::Rng;
use stripchart_core::{Align, Label, ScrollingGraph};
use stripchart_display::{Color, FontMetrics, Surface, SurfaceError};
use stripchart_sim::SimSurface;

const WIDTH: u16 = 96;
const HEIGHT: u16 = 40;

fn main() -> Result<(), SurfaceError> {
    let mut surface = SimSurface::new(WIDTH, HEIGHT);
    surface.set_font(FontMetrics::FONT_6X8);

    let mut graph: ScrollingGraph<_> = ScrollingGraph::new(surface, WIDTH, HEIGHT);
    graph.set_title(Some(
        Label::new("TITLE")
            .with_color(Color::RED)
            .with_align(Align::Center)
            .with_font(FontMetrics::FONT_8X8),
    ));
    graph.set_x_axis(Some(
        Label::new("X Axis")
            .with_color(Color::BLUE)
            .with_align(Align::Center),
    ));
    graph.set_y_axis(Some(
        Label::new("Y Axis")
            .with_color(Color::GREEN)
            .with_align(Align::Center),
    ));

    // Flat warm-up run
    for _ in 0..20 {
        graph.add_data(0);
    }

    let mut rng = rand::thread_rng();
    let mut prev = 0;
    for frame in 1..=120 {
        let value = rng.gen_range(prev - 10..=prev + 10);
        graph.add_data(value);
        graph.draw()?;
        prev = value;

        if frame % 40 == 0 {
            println!("frame {}:", frame);
            println!("{}", graph.surface());
        }
    }

    Ok(())
}
