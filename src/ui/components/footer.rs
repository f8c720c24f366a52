//! Keybinding hints on the last row.

use crate::ui::helpers::Frame;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(frame: &mut Frame, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) {
    frame
        .move_to(row, 1)
        .fg(&theme.colors.text_dim)
        .centered(&footer.keybindings, cols)
        .reset();
}
