//! Top-level rendering entry point.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_screen → Frame → stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the plugin UI into a string of ANSI output.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_screen(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}
