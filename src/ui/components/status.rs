//! Status line below the result list.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

pub fn render_status(frame: &mut Frame, row: usize, status: &StatusLine, theme: &Theme, cols: usize) {
    frame.move_to(row, 1);
    match status {
        StatusLine::Hidden => {
            frame.pad(cols);
        }
        StatusLine::Loading => {
            frame.fg(&theme.colors.loading_fg).centered("Loading...", cols);
        }
        StatusLine::NoMoreContent => {
            frame.text(Theme::dim()).fg(&theme.colors.text_dim).centered("No more content", cols);
        }
        StatusLine::LoadMore => {
            frame
                .text(Theme::bold())
                .fg(&theme.colors.selection_bg)
                .centered("[ Load more ]", cols);
        }
    }
    frame.reset();
}
