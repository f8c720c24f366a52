//! Frame buffer and text fitting shared by the components.
//!
//! Components write ANSI output into a [`Frame`] instead of stdout, so a whole
//! screen is emitted with one `print!` and can be inspected in tests.

use crate::ui::theme::Theme;

/// ANSI output for one rendered screen.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed cell.
    pub fn move_to(&mut self, row: usize, col: usize) -> &mut Self {
        self.buf.push_str(&format!("\u{1b}[{row};{col}H"));
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Writes `count` spaces.
    pub fn pad(&mut self, count: usize) -> &mut Self {
        self.buf.extend(std::iter::repeat(' ').take(count));
        self
    }

    pub fn fg(&mut self, hex: &str) -> &mut Self {
        self.text(&Theme::fg(hex))
    }

    pub fn bg(&mut self, hex: &str) -> &mut Self {
        self.text(&Theme::bg(hex))
    }

    pub fn reset(&mut self) -> &mut Self {
        self.text(Theme::reset())
    }

    /// Writes `text` centered in a line of `width` cells, padding both sides.
    pub fn centered(&mut self, text: &str, width: usize) -> &mut Self {
        let text = fit(text, width);
        let len = text.chars().count();
        let left = (width - len) / 2;
        self.pad(left).text(&text).pad(width - len - left)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Writes `text` cut or padded to exactly `width` characters.
pub fn write_cell(frame: &mut Frame, text: &str, width: usize) {
    let text = fit(text, width);
    let len = text.chars().count();
    frame.text(&text).pad(width - len);
}
