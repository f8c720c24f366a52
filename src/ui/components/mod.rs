//! Screen components.
//!
//! Each component draws one region of the screen into a [`Frame`]; the
//! regions come from [`ListArea`] so drawing and mouse hit-testing agree.
//!
//! - [`header`]: title bar
//! - [`search`]: query input box (search mode only)
//! - [`results`]: result rows
//! - [`empty`]: welcome or error message in place of the rows
//! - [`status`]: loader / end marker / load-more hint
//! - [`overlay`]: full-size preview, drawn last
//! - [`footer`]: keybinding hints

mod empty;
mod footer;
mod header;
mod overlay;
mod results;
mod search;
mod status;

use crate::ui::helpers::Frame;
use crate::ui::layout::ListArea;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Row of the header; row 1 stays blank.
const HEADER_ROW: usize = 2;

fn render_border(frame: &mut Frame, row: usize, color: &str, cols: usize) {
    frame.move_to(row, 1).fg(color).text(&"─".repeat(cols)).reset();
}

/// Draws a complete screen for a `rows` x `cols` pane.
pub fn render_screen(frame: &mut Frame, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let area = ListArea::for_pane(rows, vm.search_bar.is_some());

    let row = header::render_header(frame, HEADER_ROW, &vm.header, theme, cols);
    render_border(frame, row, &theme.colors.border, cols);

    if let Some(search_bar) = &vm.search_bar {
        search::render_search_bar(frame, row + 1, search_bar, theme, cols);
    }

    if let Some(empty_state) = &vm.empty_state {
        empty::render_empty_state(frame, area.first_row, empty_state, theme, cols);
    } else {
        results::render_results(frame, area.first_row, &vm.display_items, theme, cols);
    }

    if area.height > 0 {
        status::render_status(frame, area.status_row(), &vm.status, theme, cols);
    }

    render_border(frame, rows.saturating_sub(1), &theme.colors.border, cols);
    footer::render_footer(frame, rows, &vm.footer, theme, cols);

    if let Some(overlay_info) = &vm.overlay {
        overlay::render_overlay(frame, overlay_info, theme, rows, cols);
    }
}
