//! Scrolling text log engine
//!
//! A bounded FIFO of text lines sized from the surface's font cell at
//! construction. Long input is hard-wrapped every `char_limit`
//! characters with no word-boundary awareness; once the log is full,
//! each buffered line evicts the oldest. Every mutation redraws the
//! whole frame.

use heapless::{Deque, String};
use stripchart_display::{Color, Surface, SurfaceError};

/// Scrolling text log
///
/// `ROWS` and `COLS` bound the buffer at compile time; the logical line
/// count is `height / line_height` and the wrap limit `width / char
/// width`, both derived from the surface's current font when the log is
/// built. `COLS` is a byte bound, so non-ASCII text past it is dropped.
pub struct ScrollingText<S, const ROWS: usize = 40, const COLS: usize = 64> {
    surface: S,
    lines: Deque<String<COLS>, ROWS>,
    line_height: u16,
    line_limit: usize,
    char_limit: usize,
    color: Color,
}

impl<S: Surface, const ROWS: usize, const COLS: usize> ScrollingText<S, ROWS, COLS> {
    /// Build a log over `width` x `height` pixels, sized from the
    /// surface's current font cell
    pub fn new(surface: S, width: u16, height: u16) -> Self {
        let font = surface.font();
        let line_height = font.height.max(1);
        let line_limit = ((height / line_height) as usize).min(ROWS);
        let char_limit = ((width / font.width.max(1)) as usize).min(COLS);
        Self {
            surface,
            lines: Deque::new(),
            line_height,
            line_limit,
            char_limit,
            color: Color::WHITE,
        }
    }

    /// Lines a full log holds
    pub fn line_limit(&self) -> usize {
        self.line_limit
    }

    /// Characters per line before wrapping
    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    /// Pixel height of one line
    pub fn line_height(&self) -> u16 {
        self.line_height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Borrow the surface handle
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Release the surface handle
    pub fn free(self) -> S {
        self.surface
    }

    /// Buffer a line, hard-wrapping every `char_limit` characters, then
    /// redraw the whole log
    pub fn write_line(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.buffer_wrapped(text);
        self.draw_buffer()
    }

    /// Empty the log and redraw (a blank frame)
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        self.lines.clear();
        self.draw_buffer()
    }

    /// Change the text color and redraw every buffered line with it
    pub fn set_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.color = color;
        self.draw_buffer()
    }

    /// Split `text` into chunks of exactly `char_limit` characters, the
    /// remainder last; each chunk becomes one buffered line. Empty input
    /// buffers one blank line.
    fn buffer_wrapped(&mut self, text: &str) {
        if self.char_limit == 0 {
            return;
        }
        let mut chunk: String<COLS> = String::new();
        let mut count = 0;
        for ch in text.chars() {
            if count == self.char_limit {
                self.push_line(chunk);
                chunk = String::new();
                count = 0;
            }
            let _ = chunk.push(ch);
            count += 1;
        }
        self.push_line(chunk);
    }

    fn push_line(&mut self, line: String<COLS>) {
        if self.line_limit == 0 {
            return;
        }
        while self.lines.len() >= self.line_limit {
            self.lines.pop_front();
        }
        // Cannot fail: line_limit never exceeds ROWS
        let _ = self.lines.push_back(line);
    }

    fn draw_buffer(&mut self) -> Result<(), SurfaceError> {
        self.surface.clear()?;
        for (i, line) in self.lines.iter().enumerate() {
            let y = self.line_height as i32 * i as i32;
            self.surface.draw_text(0, y, line, Some(self.color))?;
        }
        self.surface.show()
    }
}
