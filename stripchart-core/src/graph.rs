//! Scrolling line-graph engine
//!
//! Owns a bounded sample history and redraws a full frame on demand:
//! clear, lay out labels, draw the pane border, then connect consecutive
//! samples inside the pane. Layout is recomputed from scratch every frame
//! so label changes between draws need no invalidation bookkeeping.
//! Clearing only the pane measured slower than a full clear on the small
//! SPI panels this targets, so the whole frame is redrawn.
//!
//! Vertical scaling is integer arithmetic throughout: sample offsets are
//! `round(value * pane_height / range)` with an i64 intermediate.

use heapless::Deque;
use stripchart_display::{with_font, with_rotation, Color, Surface, SurfaceError};

use crate::label::Label;

/// Default compile-time bound on retained samples.
///
/// The logical capacity is the pane width in pixels; this bound only
/// caps worst-case memory for the widest supported panel.
pub const DEFAULT_MAX_SAMPLES: usize = 320;

/// Colors for the plotted line and the pane border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphStyle {
    pub line: Color,
    pub border: Color,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            line: Color::YELLOW,
            border: Color::WHITE,
        }
    }
}

/// The sub-rectangle of the surface where data is plotted, excluding
/// labels and the border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pane {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Pane {
    /// Whether the pane has no drawable area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Resolved label position in surface coordinates (for the Y-axis, in
/// the rotated frame it is drawn in)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    x: u16,
    y: u16,
}

/// One frame's layout: label anchors, border corners, data pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    title: Option<Anchor>,
    x_axis: Option<Anchor>,
    y_axis: Option<Anchor>,
    border: Option<(u16, u16, u16, u16)>,
    pane: Pane,
}

/// Vertical scale window for one frame of samples
///
/// Maps a raw sample to a Y offset of `round(value * num / den)` where
/// `num/den` is `pane_height/range`. A flat signal widens the window by
/// half the pane height on each side and maps samples 1:1 so the line
/// renders centered instead of hugging an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scale {
    min: i64,
    num: i64,
    den: i64,
}

impl Scale {
    pub(crate) fn from_extents(min: i32, max: i32, pane_height: u16) -> Self {
        let (min, max) = (min as i64, max as i64);
        let range = max - min;
        if range == 0 {
            Self {
                min: min - pane_height as i64 / 2,
                num: 1,
                den: 1,
            }
        } else {
            Self {
                min,
                num: pane_height as i64,
                den: range,
            }
        }
    }

    /// Y offset of a raw sample within the scale window
    pub(crate) fn y_offset(&self, value: i32) -> i64 {
        round_div(value as i64 * self.num, self.den)
    }

    /// Y offset of the window minimum; anchors the pane's bottom edge
    pub(crate) fn min_offset(&self) -> i64 {
        round_div(self.min * self.num, self.den)
    }

    /// Absolute on-surface Y for a sample. Larger values plot higher;
    /// the window minimum lands on the pane's bottom edge.
    pub(crate) fn screen_y(&self, pane: Pane, value: i32) -> i64 {
        pane.y as i64 + pane.height as i64 + self.min_offset() - self.y_offset(value)
    }
}

/// Division rounding half away from zero
fn round_div(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    if n >= 0 {
        (n + d / 2) / d
    } else {
        (n - d / 2) / d
    }
}

/// Scrolling line-graph engine
///
/// `N` bounds retained samples at compile time; the logical capacity is
/// the pane width derived from the current label configuration, so the
/// buffer always holds the most recent `pane.width` samples.
pub struct ScrollingGraph<S, const N: usize = DEFAULT_MAX_SAMPLES> {
    surface: S,
    width: u16,
    height: u16,
    samples: Deque<i32, N>,
    title: Option<Label>,
    x_axis: Option<Label>,
    y_axis: Option<Label>,
    style: GraphStyle,
}

impl<S: Surface, const N: usize> ScrollingGraph<S, N> {
    /// Create a graph over `width` x `height` pixels of `surface`, with
    /// the default style and no labels
    pub fn new(surface: S, width: u16, height: u16) -> Self {
        Self {
            surface,
            width,
            height,
            samples: Deque::new(),
            title: None,
            x_axis: None,
            y_axis: None,
            style: GraphStyle::default(),
        }
    }

    /// Bind line/border colors at construction
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }

    /// Set or remove the title label (drawn along the top edge)
    pub fn set_title(&mut self, label: Option<Label>) {
        self.title = label;
    }

    /// Set or remove the X-axis label (drawn flush to the bottom edge)
    pub fn set_x_axis(&mut self, label: Option<Label>) {
        self.x_axis = label;
    }

    /// Set or remove the Y-axis label (drawn along the left edge in the
    /// previous rotation frame)
    pub fn set_y_axis(&mut self, label: Option<Label>) {
        self.y_axis = label;
    }

    pub fn style(&self) -> GraphStyle {
        self.style
    }

    /// Retained samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = i32> + '_ {
        self.samples.iter().copied()
    }

    /// The data pane the current configuration would produce
    pub fn pane(&self) -> Pane {
        self.layout().pane
    }

    /// Borrow the surface handle
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Release the surface handle
    pub fn free(self) -> S {
        self.surface
    }

    /// Append a sample, evicting the oldest while the history exceeds
    /// the pane width derived from the current label configuration
    pub fn add_data(&mut self, value: i32) {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Cannot fail: a slot was just freed if the deque was full
        let _ = self.samples.push_back(value);

        let capacity = self.layout().pane.width;
        self.trim_to(capacity);
    }

    /// Render a full frame: clear, labels and border, data line, show
    pub fn draw(&mut self) -> Result<(), SurfaceError> {
        self.surface.clear()?;
        let layout = self.layout();
        self.draw_chrome(&layout)?;
        self.trim_to(layout.pane.width);
        let line = self.style.line;
        self.draw_data(layout.pane, line)?;
        self.surface.show()
    }

    fn trim_to(&mut self, capacity: u16) {
        while self.samples.len() > capacity as usize {
            self.samples.pop_front();
        }
    }

    /// Compute the frame layout from surface metrics and label state.
    ///
    /// Pure with respect to the surface: only the current font cell is
    /// consulted, as fallback for labels without their own font. Sizes
    /// clamp to zero instead of going negative when labels request more
    /// space than the surface has.
    fn layout(&self) -> Layout {
        let fallback = self.surface.font();
        let mut left: u16 = 0;
        let mut top: u16 = 0;
        let mut width = self.width;
        let mut height = self.height;

        let mut title = None;
        if let Some(label) = self.title.as_ref().filter(|l| !l.is_blank()) {
            let font = label.font_or(fallback);
            title = Some(Anchor {
                x: label.start_x(self.width, fallback),
                y: 0,
            });
            top = font.height.min(self.height);
            height = height.saturating_sub(font.height);
        }

        let mut x_axis = None;
        if let Some(label) = self.x_axis.as_ref().filter(|l| !l.is_blank()) {
            let font = label.font_or(fallback);
            x_axis = Some(Anchor {
                x: label.start_x(self.width, fallback),
                y: self.height.saturating_sub(font.height),
            });
            height = height.saturating_sub(font.height);
        }

        let mut y_axis = None;
        if let Some(label) = self.y_axis.as_ref().filter(|l| !l.is_blank()) {
            let font = label.font_or(fallback);
            // Text runs along the rotated axis, so the surface height is
            // the available width for alignment
            y_axis = Some(Anchor {
                x: label.start_x(self.height, fallback),
                y: 0,
            });
            left = font.height.min(self.width);
            width = width.saturating_sub(font.height);
        }

        // Border sits one pixel inside the remaining rectangle
        let border = if width >= 2 && height >= 2 {
            Some((left + 1, top + 1, left + width - 1, top + height - 1))
        } else {
            None
        };

        // The pane insets two more pixels so data never touches the border
        let pane = Pane {
            x: left.saturating_add(2),
            y: top.saturating_add(2),
            width: width.saturating_sub(4),
            height: height.saturating_sub(4),
        };

        Layout {
            title,
            x_axis,
            y_axis,
            border,
            pane,
        }
    }

    /// Draw labels and the pane border for one frame
    fn draw_chrome(&mut self, layout: &Layout) -> Result<(), SurfaceError> {
        if let (Some(anchor), Some(label)) = (layout.title, self.title.as_ref()) {
            Self::draw_label(&mut self.surface, anchor, label)?;
        }
        if let (Some(anchor), Some(label)) = (layout.x_axis, self.x_axis.as_ref()) {
            Self::draw_label(&mut self.surface, anchor, label)?;
        }
        if let (Some(anchor), Some(label)) = (layout.y_axis, self.y_axis.as_ref()) {
            // Drawn in the previous rotation frame; the helper restores
            // the original rotation on every exit path
            let rotated = self.surface.rotation().prev();
            with_rotation(&mut self.surface, rotated, |surface| {
                Self::draw_label(surface, anchor, label)
            })?;
        }
        if let Some((x1, y1, x2, y2)) = layout.border {
            Self::draw_border(&mut self.surface, self.style.border, x1, y1, x2, y2)?;
        }
        Ok(())
    }

    fn draw_label(surface: &mut S, anchor: Anchor, label: &Label) -> Result<(), SurfaceError> {
        with_font(surface, label.font(), |surface| {
            surface.draw_text(anchor.x as i32, anchor.y as i32, label.text(), label.color())
        })
    }

    fn draw_border(
        surface: &mut S,
        color: Color,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), SurfaceError> {
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        surface.draw_line(x1, y1, x1, y2, color)?;
        surface.draw_line(x1, y2, x2, y2, color)?;
        surface.draw_line(x2, y2, x2, y1, color)?;
        surface.draw_line(x2, y1, x1, y1, color)
    }

    /// Connect consecutive samples inside the pane.
    ///
    /// Fewer than two samples, or a zero-area pane, is a no-op. X
    /// advances one pixel per sample from the pane's left edge.
    fn draw_data(&mut self, pane: Pane, line: Color) -> Result<(), SurfaceError> {
        if pane.is_empty() || self.samples.len() < 2 {
            return Ok(());
        }

        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for &value in self.samples.iter() {
            min = min.min(value);
            max = max.max(value);
        }
        let scale = Scale::from_extents(min, max, pane.height);

        let base_x = pane.x as i32;
        let mut prev_y: Option<i64> = None;
        for (i, &value) in self.samples.iter().enumerate() {
            let y = scale.screen_y(pane, value);
            if let Some(prev) = prev_y {
                let x = base_x + i as i32;
                self.surface.draw_line(x - 1, prev as i32, x, y as i32, line)?;
            }
            prev_y = Some(y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use proptest::prelude::*;
    use stripchart_display::{FontMetrics, Rotation};

    use super::*;
    use crate::label::Align;
    use crate::testutil::{Op, RecordingSurface};

    /// 14x14 surface with no labels gives a 10x10 pane
    fn bare_graph() -> ScrollingGraph<RecordingSurface> {
        ScrollingGraph::new(RecordingSurface::new(14, 14), 14, 14)
    }

    #[test]
    fn test_pane_without_labels() {
        let graph = bare_graph();
        assert_eq!(
            graph.pane(),
            Pane {
                x: 2,
                y: 2,
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn test_title_reduces_pane_from_top() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_title(Some(Label::new("T").with_font(FontMetrics::FONT_12X16)));
        let pane = graph.pane();
        assert_eq!(pane.y, 16 + 2);
        assert_eq!(pane.height, 60 - 16 - 4);
        assert_eq!(pane.x, 2);
        assert_eq!(pane.width, 100 - 4);
    }

    #[test]
    fn test_x_axis_reduces_pane_from_bottom() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_x_axis(Some(Label::new("x").with_font(FontMetrics::FONT_8X8)));
        let pane = graph.pane();
        // Top edge unchanged, height loses the font strip at the bottom
        assert_eq!(pane.y, 2);
        assert_eq!(pane.height, 60 - 8 - 4);
    }

    #[test]
    fn test_y_axis_reduces_pane_from_left() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_y_axis(Some(Label::new("y").with_font(FontMetrics::FONT_8X8)));
        let pane = graph.pane();
        assert_eq!(pane.x, 8 + 2);
        assert_eq!(pane.width, 100 - 8 - 4);
        assert_eq!(pane.height, 60 - 4);
    }

    #[test]
    fn test_blank_label_is_skipped() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_title(Some(Label::new("   ")));
        assert_eq!(graph.pane().y, 2);

        graph.draw().unwrap();
        assert_eq!(graph.free().text_ops().len(), 0);
    }

    #[test]
    fn test_add_data_evicts_to_pane_width() {
        let mut graph = bare_graph();
        for value in 0..25 {
            graph.add_data(value);
        }
        let samples: Vec<i32> = graph.samples().collect();
        assert_eq!(samples, (15..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_capacity_shrinks_when_labels_added() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        for value in 0..200 {
            graph.add_data(value);
        }
        assert_eq!(graph.samples().count(), 96);

        // A Y-axis label narrows the pane; the next push trims to fit
        graph.set_y_axis(Some(Label::new("y").with_font(FontMetrics::FONT_8X8)));
        graph.add_data(200);
        assert_eq!(graph.samples().count(), 100 - 8 - 4);
        assert_eq!(graph.samples().last(), Some(200));
    }

    #[test]
    fn test_draw_single_sample_draws_no_line_segments() {
        let mut graph = bare_graph();
        graph.add_data(7);
        graph.draw().unwrap();

        let surface = graph.free();
        // Only the four border segments, no data
        let lines = surface.line_ops().len();
        assert_eq!(lines, 4);
        assert_eq!(surface.show_count(), 1);
    }

    #[test]
    fn test_draw_clears_before_and_shows_after() {
        let mut graph = bare_graph();
        graph.add_data(1);
        graph.add_data(2);
        graph.draw().unwrap();

        let surface = graph.free();
        assert!(matches!(surface.ops().first(), Some(Op::Clear)));
        assert!(matches!(surface.ops().last(), Some(Op::Show)));
    }

    #[test]
    fn test_oversized_labels_clamp_pane_and_skip_data() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(6, 6), 6, 6);
        graph.set_title(Some(Label::new("TITLE").with_font(FontMetrics::FONT_12X16)));
        graph.set_x_axis(Some(Label::new("X").with_font(FontMetrics::FONT_12X16)));
        for value in 0..10 {
            graph.add_data(value);
        }

        assert!(graph.pane().is_empty());
        graph.draw().unwrap();

        // No border, no data line; the frame still flushes
        let surface = graph.free();
        assert_eq!(surface.line_ops().len(), 0);
        assert_eq!(surface.show_count(), 1);
    }

    #[test]
    fn test_rotation_restored_after_y_axis_draw() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_y_axis(Some(Label::new("Y Axis").with_align(Align::Center)));
        graph.draw().unwrap();

        let surface = graph.free();
        assert_eq!(surface.rotation(), Rotation::Deg0);
        // The label itself was journaled in the previous rotation frame
        let op = &surface.text_ops()[0];
        assert_eq!(op.rotation, Rotation::Deg270);
    }

    #[test]
    fn test_font_restored_after_title_draw() {
        let mut graph = ScrollingGraph::<_>::new(RecordingSurface::new(100, 60), 100, 60);
        graph.set_title(Some(Label::new("T").with_font(FontMetrics::FONT_12X16)));
        graph.draw().unwrap();

        let surface = graph.free();
        assert_eq!(surface.font(), FontMetrics::FONT_6X8);
        assert_eq!(surface.text_ops()[0].font, FontMetrics::FONT_12X16);
    }

    #[test]
    fn test_scale_flat_signal_centers() {
        let scale = Scale::from_extents(5, 5, 10);
        let pane = Pane {
            x: 2,
            y: 2,
            width: 10,
            height: 10,
        };
        // Window widened by 5 on each side, samples map 1:1
        assert_eq!(scale.y_offset(5), 5);
        assert_eq!(scale.screen_y(pane, 5), 2 + 10 - 5);
    }

    #[test]
    fn test_scale_minimum_anchors_bottom_edge() {
        let pane = Pane {
            x: 2,
            y: 2,
            width: 10,
            height: 10,
        };
        let scale = Scale::from_extents(5, 15, pane.height);
        assert_eq!(scale.screen_y(pane, 5), (pane.y + pane.height) as i64);
        assert_eq!(scale.screen_y(pane, 15), pane.y as i64);
    }

    #[test]
    fn test_scale_negative_values() {
        let pane = Pane {
            x: 0,
            y: 0,
            width: 20,
            height: 20,
        };
        let scale = Scale::from_extents(-10, 10, pane.height);
        assert_eq!(scale.screen_y(pane, -10), 20);
        assert_eq!(scale.screen_y(pane, 10), 0);
        assert_eq!(scale.screen_y(pane, 0), 10);
    }

    #[test]
    fn test_round_div_half_away_from_zero() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(4, 2), 2);
        assert_eq!(round_div(7, 3), 2);
    }

    #[test]
    fn test_end_to_end_flat_then_spike() {
        let mut graph = bare_graph();
        // Eleven values into a width-10 pane
        for _ in 0..10 {
            graph.add_data(5);
        }
        graph.add_data(15);

        let samples: Vec<i32> = graph.samples().collect();
        assert_eq!(samples, [5, 5, 5, 5, 5, 5, 5, 5, 5, 15]);

        graph.draw().unwrap();
        let surface = graph.free();

        // min=5 max=15 range=10 over a 10px pane: the flat run sits on
        // the pane's bottom edge (y=12), the spike reaches the top (y=2)
        let data: Vec<_> = surface
            .line_ops()
            .iter()
            .filter(|l| l.color == Color::YELLOW)
            .cloned()
            .collect();
        assert_eq!(data.len(), 9);
        for segment in &data[..8] {
            assert_eq!((segment.y1, segment.y2), (12, 12));
        }
        let last = &data[8];
        assert_eq!((last.x1, last.y1, last.x2, last.y2), (10, 12, 11, 2));
    }

    proptest! {
        #[test]
        fn prop_eviction_keeps_last_pane_width_samples(
            values in prop::collection::vec(any::<i32>(), 0..400)
        ) {
            let mut graph = bare_graph();
            for &value in &values {
                graph.add_data(value);
            }

            let kept: Vec<i32> = graph.samples().collect();
            let width = graph.pane().width as usize;
            let expected: Vec<i32> =
                values[values.len().saturating_sub(width)..].to_vec();
            prop_assert_eq!(kept, expected);
        }

        #[test]
        fn prop_flat_signal_lands_mid_pane(value in any::<i16>()) {
            let scale = Scale::from_extents(value as i32, value as i32, 10);
            let pane = Pane { x: 0, y: 0, width: 60, height: 10 };
            prop_assert_eq!(scale.screen_y(pane, value as i32), 5);
        }
    }
}
