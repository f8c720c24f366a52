//! Title bar.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Draws the bold, centered title at `row` and returns the next row.
pub fn render_header(frame: &mut Frame, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    frame.move_to(row, 1).text(Theme::bold()).fg(&theme.colors.header_fg);
    if let Some(bg) = &theme.colors.header_bg {
        frame.bg(bg);
    }
    frame.centered(&header.title, cols).reset();
    row + 1
}
