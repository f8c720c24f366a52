//! Result rows: `#id  caption  thumbnail-url`.

use crate::ui::helpers::{write_cell, Frame};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the id column including its trailing gap.
const ID_WIDTH: usize = 12;

/// Width of the caption column including its trailing gap.
const CAPTION_WIDTH: usize = 40;

/// Draws `items` from `row` down and returns the first row after them.
pub fn render_results(frame: &mut Frame, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    for (offset, item) in items.iter().enumerate() {
        render_row(frame, row + offset, item, theme, cols);
    }
    row + items.len()
}

fn render_row(frame: &mut Frame, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) {
    let colors = &theme.colors;
    frame.move_to(row, 1);

    let url_width = cols.saturating_sub(ID_WIDTH + CAPTION_WIDTH);
    if item.is_selected {
        frame.fg(&colors.selection_fg).bg(&colors.selection_bg).text(Theme::bold());
        write_cell(frame, &item.id, ID_WIDTH.min(cols));
        write_cell(frame, &item.caption, CAPTION_WIDTH.min(cols.saturating_sub(ID_WIDTH)));
        write_cell(frame, &item.thumbnail_url, url_width);
    } else {
        frame.fg(&colors.id_fg);
        write_cell(frame, &item.id, ID_WIDTH.min(cols));
        frame.fg(&colors.text_normal);
        write_cell(frame, &item.caption, CAPTION_WIDTH.min(cols.saturating_sub(ID_WIDTH)));
        frame.fg(&colors.url_fg);
        write_cell(frame, &item.thumbnail_url, url_width);
    }
    frame.reset();
}
