//! Search input box.
//!
//! ```text
//!   ┌──────────────────────┐
//!   │ Search: red panda▏   │
//!   └──────────────────────┘
//! ```

use crate::ui::helpers::{write_cell, Frame};
use crate::ui::layout::SEARCH_BAR_ROWS;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the box.
const MARGIN: usize = 2;

/// Draws the box starting at `row` and returns the first row below it.
pub fn render_search_bar(frame: &mut Frame, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner = cols.saturating_sub(MARGIN * 2 + 2);
    let border = &theme.colors.search_bar_border;
    let rule = "─".repeat(inner);

    frame.move_to(row, 1).pad(MARGIN).fg(border).text(&format!("┌{rule}┐")).reset();

    // Keep the tail of long queries visible, it is where the cursor is.
    let prompt = " Search: ";
    let room = inner.saturating_sub(prompt.chars().count() + 1);
    let query_len = search.query.chars().count();
    let visible: String = search.query.chars().skip(query_len.saturating_sub(room)).collect();

    frame.move_to(row + 1, 1).pad(MARGIN).fg(border).text("│").fg(&theme.colors.text_normal);
    write_cell(frame, &format!("{prompt}{visible}▏"), inner);
    frame.fg(border).text("│").reset();

    frame.move_to(row + 2, 1).pad(MARGIN).fg(border).text(&format!("└{rule}┘")).reset();

    row + SEARCH_BAR_ROWS
}
