//! Input mode state for the application.
//!
//! The plugin is either browsing results (`Normal`) or editing the search
//! query (`Search`). The mode decides how keys are interpreted, whether the
//! search bar is drawn, and which keybinding hints the footer shows.
//!
//! # Example
//!
//! ```rust
//! use pixellij::app::modes::InputMode;
//!
//! let mode = InputMode::Search;
//! assert!(mode.is_search());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Browsing results.
    ///
    /// Available keybindings: j/k (navigate), / (search), enter (open),
    /// m or space (load more), o (open in browser), q (quit).
    #[default]
    Normal,

    /// Typing a query into the search bar.
    ///
    /// Characters edit the draft, enter submits it, escape abandons it.
    Search,
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }
}
