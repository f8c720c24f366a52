//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: the visible window of results,
//! the status line variant, and the overlay contents.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Result rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Line below the result list (loader, error, end marker, load-more hint).
    pub status: StatusLine,

    /// Centered message shown instead of the result list.
    pub empty_state: Option<EmptyState>,

    /// Search bar contents while the user is typing a query.
    pub search_bar: Option<SearchBarInfo>,

    /// Full-size preview drawn above everything else.
    pub overlay: Option<OverlayInfo>,
}

/// Display information for one search result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Provider image id, shown as the first column.
    pub id: String,

    /// Caption, truncated to the caption column.
    pub caption: String,

    /// Thumbnail URL, truncated from the left to fit the pane.
    pub thumbnail_url: String,

    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "/: search  m: more  q: quit").
    pub keybindings: String,
}

/// Contents of the status line below the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Nothing to show.
    Hidden,
    /// A page is being fetched.
    Loading,
    /// No further pages exist for the query.
    NoMoreContent,
    /// More pages can be requested.
    LoadMore,
}

/// Centered message shown in place of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Whether the message reports a failure (drawn in the error color).
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Query being typed.
    pub query: String,
}

/// Contents of the full-size preview overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    pub full_image_url: String,
    pub caption: String,
}
