//! Session state for the single active query.
//!
//! [`SessionState`] is the explicit state object of one query/pagination
//! lifecycle. Its fields are private and its mutators are visible only inside
//! the `app` module, so the pagination controller is the single writer while
//! the UI reads through the public getters.

use crate::domain::ResultItem;

/// Loading lifecycle of the current query.
///
/// Exactly one status holds at a time. `Error` carries the message shown to
/// the user in place of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No fetch has completed or started for the current query.
    #[default]
    Idle,
    /// A page fetch is in flight.
    Loading,
    /// The last fetch failed or returned nothing.
    Error(String),
    /// The last fetch succeeded.
    Ready,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Error message, if the session is in the error state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// State of the current query session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    query: String,
    page: u32,
    results: Vec<ResultItem>,
    status: SessionStatus,
    terminal: bool,
    scroll_target: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            results: Vec::new(),
            status: SessionStatus::Idle,
            terminal: false,
            scroll_target: 0,
        }
    }
}

impl SessionState {
    /// Current query; empty before the first search.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current page number, starting at 1.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Accumulated results in display order.
    #[must_use]
    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    #[must_use]
    pub const fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Whether the provider reported that no further pages exist.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Content row the viewport should scroll to after new results arrive.
    #[must_use]
    pub const fn scroll_target(&self) -> usize {
        self.scroll_target
    }

    /// Starts a fresh session for `query`.
    pub(super) fn reset_for(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
        self.results.clear();
        self.status = SessionStatus::Idle;
        self.terminal = false;
        self.scroll_target = 0;
    }

    /// Advances to the next page, remembering where to scroll once it lands.
    pub(super) fn advance_page(&mut self, scroll_target: usize) {
        self.page += 1;
        self.scroll_target = scroll_target;
    }

    pub(super) fn begin_loading(&mut self) {
        self.status = SessionStatus::Loading;
    }

    /// Appends a page of results and ends the loading cycle.
    pub(super) fn append_page(&mut self, items: Vec<ResultItem>, last_page: bool) {
        self.results.extend(items);
        self.terminal = last_page;
        self.status = SessionStatus::Ready;
    }

    /// Ends the loading cycle with an error message.
    pub(super) fn fail(&mut self, message: String) {
        self.status = SessionStatus::Error(message);
    }
}
