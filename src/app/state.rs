//! Application state management and view model computation.
//!
//! [`AppState`] bundles the controllers with the purely presentational state
//! (input mode, query draft, selection, viewport) and computes the
//! [`UIViewModel`] the renderer draws.
//!
//! # State Components
//!
//! - **Pagination**: query session, results and loading status (single writer)
//! - **Overlay**: full-size preview and its dismissal listener
//! - **Gateway**: provider configuration and last-page bookkeeping
//! - **Selection / Viewport**: cursor position and first visible result
//! - **Input Mode**: browsing or typing a query
//!
//! # Example
//!
//! ```rust
//! use pixellij::app::AppState;
//! use pixellij::gateway::{GatewayConfig, PixabayGateway};
//! use pixellij::ui::Theme;
//!
//! let state = AppState::new(PixabayGateway::new(GatewayConfig::default()), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.display_items.is_empty());
//! ```

use super::modes::InputMode;
use super::overlay::{ListenerRegistry, OverlayController, OverlayState};
use super::pagination::PaginationController;
use super::session::SessionStatus;
use crate::domain::ResultItem;
use crate::gateway::PixabayGateway;
use crate::ui::layout::ListArea;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, HeaderInfo, OverlayInfo, SearchBarInfo, StatusLine, UIViewModel,
};

/// Pane size assumed before the first render reports the real one.
const DEFAULT_PANE_ROWS: usize = 24;
const DEFAULT_PANE_COLS: usize = 80;

/// Width of the id column including its trailing gap.
const ID_COLUMN_WIDTH: usize = 12;

/// Longest caption shown before truncation.
const CAPTION_COLUMN_WIDTH: usize = 40;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Query session and fetch lifecycle. All session mutation goes through it.
    pub pagination: PaginationController,

    /// Full-size preview overlay.
    pub overlay: OverlayController,

    /// Provider configuration and last-page bookkeeping.
    pub gateway: PixabayGateway,

    pub input_mode: InputMode,

    /// Query text being edited in the search bar.
    pub draft_query: String,

    /// Index of the selected result.
    pub selected_index: usize,

    /// Index of the first result drawn in the list area.
    pub viewport_top: usize,

    /// Pane height reported by the last render.
    pub pane_rows: usize,

    /// Pane width reported by the last render.
    pub pane_cols: usize,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(gateway: PixabayGateway, theme: Theme) -> Self {
        Self::with_registry(gateway, theme, ListenerRegistry::new())
    }

    /// Creates state whose overlay attaches listeners to `registry`.
    #[must_use]
    pub fn with_registry(gateway: PixabayGateway, theme: Theme, registry: ListenerRegistry) -> Self {
        Self {
            pagination: PaginationController::new(),
            overlay: OverlayController::new(registry),
            gateway,
            input_mode: InputMode::Normal,
            draft_query: String::new(),
            selected_index: 0,
            viewport_top: 0,
            pane_rows: DEFAULT_PANE_ROWS,
            pane_cols: DEFAULT_PANE_COLS,
            theme,
        }
    }

    /// Accumulated results of the current query.
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        self.pagination.session().results()
    }

    /// Whether result rows are drawn; an error or the welcome message
    /// replaces them.
    #[must_use]
    pub fn shows_results(&self) -> bool {
        let session = self.pagination.session();
        match session.status() {
            SessionStatus::Error(_) => false,
            SessionStatus::Idle => !session.query().is_empty(),
            SessionStatus::Loading | SessionStatus::Ready => true,
        }
    }

    /// Results the user can currently see and interact with.
    fn visible_results(&self) -> &[ResultItem] {
        if self.shows_results() {
            self.results()
        } else {
            &[]
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.visible_results().get(self.selected_index)
    }

    /// Records the pane size so hit-testing matches what was drawn.
    pub fn set_pane_size(&mut self, rows: usize, cols: usize) {
        self.pane_rows = rows;
        self.pane_cols = cols;
        self.viewport_top = self.clamp_viewport(self.viewport_top);
    }

    #[must_use]
    pub const fn list_area(&self) -> ListArea {
        ListArea::for_pane(self.pane_rows, self.input_mode.is_search())
    }

    /// Total rendered content rows: one per result plus the status line.
    #[must_use]
    pub fn content_height(&self) -> usize {
        self.results().len() + 1
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
        self.ensure_selection_visible();
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 { len - 1 } else { self.selected_index - 1 };
        self.ensure_selection_visible();
    }

    /// Jumps the viewport to the session's scroll target.
    ///
    /// Called after results or the scroll target change. The target is a
    /// content row; it is clamped so the list never scrolls past its end.
    pub fn scroll_to_target(&mut self) {
        self.viewport_top = self.clamp_viewport(self.pagination.session().scroll_target());
        self.clamp_selection_to_viewport();
    }

    /// Scrolls the viewport by `delta` rows (mouse wheel).
    pub fn scroll_by(&mut self, delta: isize) {
        let top = if delta.is_negative() {
            self.viewport_top.saturating_sub(delta.unsigned_abs())
        } else {
            self.viewport_top.saturating_add(delta.unsigned_abs())
        };
        self.viewport_top = self.clamp_viewport(top);
        self.clamp_selection_to_viewport();
    }

    /// Returns selection and viewport to the top for a new query.
    pub fn reset_view(&mut self) {
        self.selected_index = 0;
        self.viewport_top = 0;
    }

    /// Index of the result drawn on terminal `row` (1-indexed), if any.
    #[must_use]
    pub fn item_at_row(&self, row: usize) -> Option<usize> {
        self.list_area()
            .item_at(row, self.viewport_top)
            .filter(|&index| index < self.visible_results().len())
    }

    fn clamp_viewport(&self, top: usize) -> usize {
        let max_top = self.results().len().saturating_sub(self.list_area().height);
        top.min(max_top)
    }

    fn ensure_selection_visible(&mut self) {
        let height = self.list_area().height.max(1);
        if self.selected_index < self.viewport_top {
            self.viewport_top = self.selected_index;
        } else if self.selected_index >= self.viewport_top + height {
            self.viewport_top = self.selected_index + 1 - height;
        }
    }

    fn clamp_selection_to_viewport(&mut self) {
        let len = self.results().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        let height = self.list_area().height.max(1);
        let last_visible = (self.viewport_top + height - 1).min(len - 1);
        self.selected_index = self.selected_index.clamp(self.viewport_top.min(last_visible), last_visible);
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// An error status replaces the result list with the error message; an
    /// idle session with no query shows the welcome message. Otherwise the
    /// visible window starts at `viewport_top`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let session = self.pagination.session();
        let area = ListArea::for_pane(rows, self.input_mode.is_search());

        let empty_state = match session.status() {
            SessionStatus::Error(message) => Some(EmptyState {
                message: message.clone(),
                subtitle: if self.pagination.can_request_more() {
                    "Press m to try the next page or / to search again".to_string()
                } else {
                    "Press / to search again".to_string()
                },
                is_error: true,
            }),
            SessionStatus::Idle if session.query().is_empty() => Some(EmptyState {
                message: "Search Pixabay images".to_string(),
                subtitle: "Press / and type a query".to_string(),
                is_error: false,
            }),
            _ => None,
        };

        let display_items = if empty_state.is_some() {
            vec![]
        } else {
            let start = self.viewport_top.min(session.results().len());
            let end = (start + area.height).min(session.results().len());
            session.results()[start..end]
                .iter()
                .enumerate()
                .map(|(offset, item)| Self::compute_display_item(item, start + offset == self.selected_index, cols))
                .collect()
        };

        UIViewModel {
            display_items,
            header: self.compute_header(),
            footer: self.compute_footer(),
            status: self.compute_status(),
            empty_state,
            search_bar: self.compute_search_bar(),
            overlay: self.compute_overlay(),
        }
    }

    fn compute_display_item(item: &ResultItem, is_selected: bool, cols: usize) -> DisplayItem {
        let caption = truncate_end(item.display_caption(), CAPTION_COLUMN_WIDTH - 2);
        let url_width = cols.saturating_sub(ID_COLUMN_WIDTH + CAPTION_COLUMN_WIDTH + 1);
        DisplayItem {
            id: format!("#{}", item.id),
            caption,
            thumbnail_url: truncate_start(&item.thumbnail_url, url_width),
            is_selected,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let session = self.pagination.session();
        let title = if session.query().is_empty() {
            " Pixellij ".to_string()
        } else {
            format!(
                " \"{}\" ({} images, page {}) ",
                session.query(),
                session.results().len(),
                session.page()
            )
        };
        HeaderInfo { title }
    }

    fn compute_status(&self) -> StatusLine {
        let session = self.pagination.session();
        match session.status() {
            SessionStatus::Loading => StatusLine::Loading,
            SessionStatus::Error(_) => StatusLine::Hidden,
            SessionStatus::Idle | SessionStatus::Ready => {
                if session.is_terminal() {
                    StatusLine::NoMoreContent
                } else if session.results().is_empty() {
                    StatusLine::Hidden
                } else {
                    StatusLine::LoadMore
                }
            }
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.overlay.state().is_open() {
            "ESC or click outside: close  o: open in browser".to_string()
        } else if self.input_mode.is_search() {
            "ESC: cancel  Enter: search  Type your query".to_string()
        } else if self.pagination.can_request_more() {
            "j/k: navigate  Enter: view  m: more  /: search  q: quit".to_string()
        } else {
            "j/k: navigate  Enter: view  /: search  q: quit".to_string()
        };
        FooterInfo { keybindings }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.input_mode.is_search().then(|| SearchBarInfo {
            query: self.draft_query.clone(),
        })
    }

    fn compute_overlay(&self) -> Option<OverlayInfo> {
        match self.overlay.state() {
            OverlayState::Open {
                full_image_url,
                caption,
            } => Some(OverlayInfo {
                full_image_url: full_image_url.clone(),
                caption: caption.clone(),
            }),
            OverlayState::Closed => None,
        }
    }
}

/// Truncates `text` to `max` characters, marking the cut with "...".
fn truncate_end(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Truncates `text` from the left, keeping its tail (the distinctive part of a URL).
fn truncate_start(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let tail: String = text.chars().skip(len - keep).collect();
    format!("...{tail}")
}
