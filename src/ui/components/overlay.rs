//! Full-size preview box drawn over the rest of the screen.

use crate::ui::helpers::{write_cell, Frame};
use crate::ui::layout::OverlayBox;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::OverlayInfo;

pub fn render_overlay(frame: &mut Frame, overlay: &OverlayInfo, theme: &Theme, rows: usize, cols: usize) {
    let bounds = OverlayBox::for_pane(rows, cols);
    if bounds.height < 3 || bounds.width < 4 {
        return;
    }
    let colors = &theme.colors;
    let inner = bounds.width - 2;
    let text_width = bounds.inner_width();

    let open_line = |frame: &mut Frame, offset: usize| {
        frame.move_to(bounds.top + offset, bounds.left).fg(&colors.overlay_border);
        if let Some(bg) = &colors.overlay_bg {
            frame.bg(bg);
        }
        frame.text("│ ");
    };
    let close_line = |frame: &mut Frame| {
        frame.fg(&colors.overlay_border).text(" │").reset();
    };

    let lines: [(Option<&str>, String); 5] = [
        (None, String::new()),
        (Some(colors.text_normal.as_str()), overlay.caption.clone()),
        (None, String::new()),
        (Some(colors.url_fg.as_str()), overlay.full_image_url.clone()),
        (Some(colors.text_dim.as_str()), "o: open in browser   esc: close".to_string()),
    ];

    frame.move_to(bounds.top, bounds.left).fg(&colors.overlay_border);
    if let Some(bg) = &colors.overlay_bg {
        frame.bg(bg);
    }
    frame.text(&format!("╭{}╮", "─".repeat(inner))).reset();

    for (offset, (color, text)) in lines.iter().enumerate().take(bounds.height - 2) {
        open_line(frame, offset + 1);
        if let Some(color) = color {
            frame.fg(color);
        }
        write_cell(frame, text, text_width);
        close_line(frame);
    }

    frame.move_to(bounds.top + bounds.height - 1, bounds.left).fg(&colors.overlay_border);
    if let Some(bg) = &colors.overlay_bg {
        frame.bg(bg);
    }
    frame.text(&format!("╰{}╯", "─".repeat(inner))).reset();
}
