//! Centered message shown instead of the result list.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Draws the message two rows below `row`, with the subtitle under it.
///
/// Error messages use the error color; everything else the empty-state color.
pub fn render_empty_state(frame: &mut Frame, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    frame.move_to(row + 2, 1).fg(color).centered(&empty.message, cols).reset();
    frame
        .move_to(row + 3, 1)
        .text(Theme::dim())
        .fg(&theme.colors.text_dim)
        .centered(&empty.subtitle, cols)
        .reset();
}
